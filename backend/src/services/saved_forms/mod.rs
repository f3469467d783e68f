//! # Saved Form Library Service
//!
//! Exposes the user-maintained library of custom templates under
//! `/api/saved_forms`. Entries live in a SQLite file (`FORMS_DB`), one JSON
//! template per row. The legal-text dialog reads this library and keeps only
//! the entries its fuzzy filter accepts.
//!
//! ## Sub-modules:
//! - `library`: SQLite access, table creation and first-run seeding.
//! - `list`: Handler returning every readable saved template.

pub mod library;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for the saved-form endpoints.
const API_PATH: &str = "/api/saved_forms";

/// Configures and returns the Actix `Scope` for the saved-form routes.
///
/// # Registered Routes:
///
/// *   **`GET /api/saved_forms`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns every row of the `saved_forms` table that
///       parses as a template, in insertion order. Rows that fail to parse are
///       logged and left out. A database error answers `503 Service Unavailable`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}
