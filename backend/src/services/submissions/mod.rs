//! # Submission Service
//!
//! Receives completed forms from the dialogs and keeps them in the in-memory
//! inbox (`crate::inbox::state`).
//!
//! ## Sub-modules:
//! - `accept`: Validates a `SubmissionPackage`, queues it for recording and returns a receipt.
//! - `get`: Looks up a recorded package by receipt id.

mod accept;
mod get;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for the submission endpoints.
const API_PATH: &str = "/api/submissions";

/// Configures and returns the Actix `Scope` for the submission routes.
///
/// # Registered Routes:
///
/// *   **`POST /api/submissions`**:
///     - **Handler**: `accept::process`
///     - **Description**: Accepts a JSON `SubmissionPackage`. A package with an
///       empty `templateId` is rejected with `400 Bad Request`. On success the
///       package is queued for the inbox recorder and the reply is a
///       `SubmissionReceipt` (`{"receiptId": "..."}`).
///
/// *   **`GET /api/submissions/{receipt_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the recorded package for a receipt, or `404 Not Found`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(accept::process))
        .route("/{receipt_id}", get().to(get::process))
}
