//! # Template Catalogue Service
//!
//! Serves the curated template catalogue under `/api/templates`. The catalogue
//! is a set of JSON files compiled into the binary (see `catalogue`), parsed
//! once at startup and shared as `web::Data<StaticCatalogue>`.
//!
//! ## Sub-modules:
//! - `catalogue`: Loads and validates the embedded JSON files.
//! - `list`: Handler returning every curated template.

pub mod catalogue;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for the curated catalogue endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for the catalogue routes.
///
/// # Registered Routes:
///
/// *   **`GET /api/templates`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns the whole curated catalogue as a JSON array of
///       templates. Filtering by form kind happens client-side, in the session
///       that owns the dialog.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}
