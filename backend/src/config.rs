//! Server settings read from the environment.
//!
//! | Variable             | Default          |
//! |----------------------|------------------|
//! | `FORMS_HOST`         | `127.0.0.1`      |
//! | `FORMS_PORT`         | `8080`           |
//! | `FORMS_DB`           | `forms.sqlite`   |
//! | `FORMS_OPEN_BROWSER` | `true`           |
//!
//! A value that does not parse falls back to its default with a warning.

use log::warn;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB: &str = "forms.sqlite";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the saved-form library.
    pub db_path: PathBuf,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB),
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("FORMS_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(raw) = lookup("FORMS_PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("FORMS_PORT `{}` is not a port number, using {}", raw, DEFAULT_PORT),
            }
        }
        if let Some(path) = lookup("FORMS_DB").filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup("FORMS_OPEN_BROWSER") {
            match parse_flag(&raw) {
                Some(flag) => config.open_browser = flag,
                None => warn!("FORMS_OPEN_BROWSER `{}` is not a boolean, using true", raw),
            }
        }
        config
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FORMS_HOST", " 0.0.0.0 "),
            ("FORMS_PORT", "9000"),
            ("FORMS_DB", "/tmp/library.sqlite"),
            ("FORMS_OPEN_BROWSER", "off"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/library.sqlite"));
        assert!(!config.open_browser);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FORMS_PORT", "eighty"),
            ("FORMS_OPEN_BROWSER", "maybe"),
            ("FORMS_HOST", "   "),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.open_browser);
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
