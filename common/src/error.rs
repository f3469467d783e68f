use thiserror::Error;

/// Recoverable failures reported by the form engine.
///
/// None of these leave the engine in a broken state: the session keeps its
/// selection and record exactly as they were before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no form template is selected")]
    NoTemplateSelected,

    #[error("field `{0}` is not part of the selected template")]
    UnknownField(String),

    #[error("field `{field}` expects a {expected} value")]
    ValueKindMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("submission for template `{0}` was rejected")]
    SinkRejected(String),
}
