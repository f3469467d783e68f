//! Embedded curated catalogue.
//!
//! Every `*.json` file under `data/catalogue` holds a JSON array of templates.
//! Files are read in path order and each array element is read on its own:
//! a file that is not a JSON array, or an element that is not a template, is
//! skipped with a warning rather than failing startup. Templates with
//! colliding ids or field identifiers are dropped by `StaticCatalogue::new`.

use common::engine::catalogue::StaticCatalogue;
use common::model::template::FormTemplate;
use include_dir::{include_dir, Dir};
use log::{info, warn};

static CATALOGUE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data/catalogue");

/// Builds the curated catalogue from the files compiled into the binary.
pub fn embedded_catalogue() -> StaticCatalogue {
    let catalogue = StaticCatalogue::new(parse_template_files(json_files(&CATALOGUE_DIR)));
    info!("Curated catalogue loaded: {} templates", catalogue.len());
    catalogue
}

/// `(path, contents)` of every UTF-8 `.json` file directly inside `dir`, sorted by path.
pub(crate) fn json_files<'a>(dir: &'a Dir<'a>) -> Vec<(String, &'a str)> {
    let mut files: Vec<(String, &str)> = dir
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|f| {
            let path = f.path().display().to_string();
            match f.contents_utf8() {
                Some(text) => Some((path, text)),
                None => {
                    warn!("Skipping `{}`: not valid UTF-8", path);
                    None
                }
            }
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

/// Parses each file as a template array, concatenating the readable entries in order.
pub(crate) fn parse_template_files<P, S>(files: impl IntoIterator<Item = (P, S)>) -> Vec<FormTemplate>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let mut templates = Vec::new();
    for (path, contents) in files {
        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(contents.as_ref()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping catalogue file `{}`: {}", path.as_ref(), e);
                continue;
            }
        };
        for (position, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<FormTemplate>(entry) {
                Ok(template) => templates.push(template),
                Err(e) => warn!(
                    "Skipping template #{} of `{}`: {}",
                    position,
                    path.as_ref(),
                    e
                ),
            }
        }
    }
    templates
}
