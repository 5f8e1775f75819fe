//! Error types for Feedloom Core.

use thiserror::Error;

/// Core errors raised by key handling and response decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid key format: expected at least {min} hex characters, got {len}")]
    InvalidKeyFormat { min: usize, len: usize },

    #[error("invalid key format: non-hex character {found:?} at position {position}")]
    NonHexKey { position: usize, found: char },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CoreError {
    /// Whether this error concerns key material rather than response shape.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidKeyFormat { .. } | CoreError::NonHexKey { .. }
        )
    }
}

/// Reasons a single wire operation (or identity record) fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("timestamp {0} is not a non-negative integer")]
    InvalidTimestamp(String),

    #[error("field `public_key`: {0}")]
    InvalidKey(CoreError),

    #[error("expected a JSON object")]
    NotAnObject,
}

impl From<ValidationError> for CoreError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidKey(inner) => inner,
            other => CoreError::MalformedResponse(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_errors_survive_conversion() {
        let err: CoreError =
            ValidationError::InvalidKey(CoreError::InvalidKeyFormat { min: 12, len: 3 }).into();
        assert!(err.is_key_error());
    }

    #[test]
    fn test_shape_errors_become_malformed_response() {
        let err: CoreError = ValidationError::MissingField("timestamp").into();
        assert_eq!(
            err,
            CoreError::MalformedResponse("missing field `timestamp`".into())
        );
    }
}
