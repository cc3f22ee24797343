//! Error types for the paginator.
//!
//! Parsing query parameters and building page links never fail. The errors
//! here only cover the edges where the caller hands in something that cannot
//! be used at all: an unparsable request URL, or a field name rejected by a
//! [`FieldAllowList`](crate::FieldAllowList).

use thiserror::Error;

/// Errors produced at the fallible edges of the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginatorError {
    /// The request URL could not be parsed.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The field is well formed but not in the allow-list.
    #[error("field not allowed: {field}")]
    FieldNotAllowed {
        /// The rejected field name.
        field: String,
    },

    /// The field name is not a plain identifier.
    #[error("invalid field name: {field:?}")]
    InvalidFieldName {
        /// The rejected field name.
        field: String,
    },
}

impl PaginatorError {
    /// Returns the offending field name, if the error is about a field.
    pub fn field(&self) -> Option<&str> {
        match self {
            PaginatorError::FieldNotAllowed { field }
            | PaginatorError::InvalidFieldName { field } => Some(field),
            PaginatorError::InvalidUrl(_) => None,
        }
    }
}

/// Result type alias for paginator operations.
pub type PaginatorResult<T> = Result<T, PaginatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_allowed_display() {
        let err = PaginatorError::FieldNotAllowed {
            field: "password".to_string(),
        };
        assert_eq!(err.to_string(), "field not allowed: password");
        assert_eq!(err.field(), Some("password"));
    }

    #[test]
    fn test_invalid_url_from_parse_error() {
        let err: PaginatorError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid request url"));
        assert_eq!(err.field(), None);
    }
}
