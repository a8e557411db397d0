//! Input validation errors

use thiserror::Error;

/// Reasons a payload is rejected before it reaches the renderer.
///
/// Every variant carries the full path of the offending field, e.g.
/// `meeting.meeting_points[0].voting.voteType`.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("Field {0} must not be empty")]
    EmptyIdentifier(String),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl InputError {
    /// Path of the field that failed, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            InputError::Json(_) => None,
            InputError::MissingField(field) | InputError::EmptyIdentifier(field) => Some(field),
            InputError::InvalidType { field, .. } | InputError::InvalidValue { field, .. } => {
                Some(field)
            }
        }
    }
}
