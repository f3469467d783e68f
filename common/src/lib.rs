//! Shared model and form engine.
//!
//! `model` holds the serde types exchanged between the backend and the
//! frontend (templates, records, submission packages). `engine` holds the
//! rendering-independent logic that turns a selected template into a live
//! record, resolves widgets for its fields and gates submission.

pub mod engine;
pub mod error;
pub mod model;

pub use engine::session::FormSession;
pub use error::EngineError;
