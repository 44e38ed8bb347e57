//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HbnbError`]
//! via `#[from]` (or an explicit `From` impl for boxed storage errors).

use crate::record::Kind;

/// Top-level error returned by services and storage ports.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    /// Client input was rejected.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Client input errors. The `Display` output is the message returned to API callers.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body is absent, not JSON, not an object, or an empty object.
    #[error("Not a JSON")]
    NotAJson,

    /// A required field is absent, null, or an empty string.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] serde_json::Error),

    /// The password could not be hashed.
    #[error("Invalid password")]
    InvalidPassword,
}

/// A lookup by id did not resolve.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: Kind,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(kind: Kind, id: impl ToString) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_missing_field_with_its_name() {
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "Missing name"
        );
    }

    #[test]
    fn should_format_not_a_json() {
        assert_eq!(ValidationError::NotAJson.to_string(), "Not a JSON");
    }

    #[test]
    fn should_describe_missing_record() {
        let err = NotFoundError::new(Kind::City, "abc");
        assert_eq!(err.to_string(), "City abc not found");
    }

    #[test]
    fn should_convert_validation_error_into_hbnb_error() {
        let err: HbnbError = ValidationError::NotAJson.into();
        assert!(matches!(err, HbnbError::Validation(ValidationError::NotAJson)));
    }
}
