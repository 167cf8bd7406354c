//! Validation errors for submission parameters and annotation fields

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid annotations per ID: '{0}' (expected a positive integer or \"all\")")]
    InvalidCount(String),

    #[error("Malformed bounding box: '{0}'")]
    MalformedBoundingBox(String),

    #[error("Invalid boolean: '{0}'")]
    InvalidBool(String),
}
