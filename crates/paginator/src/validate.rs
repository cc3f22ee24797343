//! Field allow-list.
//!
//! The parser accepts any parameter name as a filter field and the predicate
//! builders interpolate names literally. A [`FieldAllowList`] is the opt-in
//! layer that checks names before they reach a storage backend.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{PaginatorError, PaginatorResult};
use crate::filter::{ArrayFilterSpec, SearchFilterSpec};
use crate::params::QueryDirective;

/// A set of field names that may be filtered, ordered or searched on.
///
/// # Example
///
/// ```rust
/// use paginator::{FieldAllowList, ParamParser};
///
/// let allow = FieldAllowList::new(["id", "status"]);
///
/// let ok = ParamParser::new().parse_query("status=open&ordering=-id");
/// assert!(allow.check_directive(&ok).is_ok());
///
/// let bad = ParamParser::new().parse_query("password=x");
/// assert!(allow.check_directive(&bad).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAllowList {
    fields: BTreeSet<String>,
}

impl FieldAllowList {
    /// Creates an allow-list from field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if no field is allowed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks if a field is in the list.
    pub fn allows(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Checks a single field name.
    pub fn check(&self, field: &str) -> PaginatorResult<()> {
        if !is_identifier(field) {
            warn!(field = %field, "Rejected malformed field name");
            return Err(PaginatorError::InvalidFieldName {
                field: field.to_string(),
            });
        }

        if !self.allows(field) {
            warn!(field = %field, "Rejected field not in allow-list");
            return Err(PaginatorError::FieldNotAllowed {
                field: field.to_string(),
            });
        }

        Ok(())
    }

    /// Checks every filter key and the ordering field of a directive.
    pub fn check_directive(&self, directive: &QueryDirective) -> PaginatorResult<()> {
        for field in directive.filter.keys() {
            self.check(field)?;
        }
        if let Some(ordering) = &directive.ordering {
            self.check(&ordering.field)?;
        }
        Ok(())
    }

    /// Checks the declared array fields.
    pub fn check_array_fields(&self, spec: &ArrayFilterSpec) -> PaginatorResult<()> {
        spec.fields().iter().try_for_each(|f| self.check(f))
    }

    /// Checks the declared search fields.
    pub fn check_search_fields(&self, spec: &SearchFilterSpec) -> PaginatorResult<()> {
        spec.fields().iter().try_for_each(|f| self.check(f))
    }
}

/// `[A-Za-z_][A-Za-z0-9_.]*`
fn is_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamParser;

    #[test]
    fn test_identifier() {
        assert!(is_identifier("status"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("author.name"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("name; DROP TABLE items"));
        assert!(!is_identifier("lower(x)"));
    }

    #[test]
    fn test_check() {
        let allow = FieldAllowList::new(["status"]);
        assert!(allow.check("status").is_ok());
        assert_eq!(
            allow.check("owner"),
            Err(PaginatorError::FieldNotAllowed {
                field: "owner".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_name_rejected_even_if_listed() {
        let allow = FieldAllowList::new(["a'b"]);
        assert!(matches!(
            allow.check("a'b"),
            Err(PaginatorError::InvalidFieldName { .. })
        ));
    }

    #[test]
    fn test_check_directive_ordering_field() {
        let allow = FieldAllowList::new(["status"]);
        let directive = ParamParser::new().parse_query("status=a&ordering=-secret");
        let err = allow.check_directive(&directive).unwrap_err();
        assert_eq!(err.field(), Some("secret"));
    }

    #[test]
    fn test_check_specs() {
        let allow = FieldAllowList::new(["title", "tags"]);
        assert!(allow.check_array_fields(&ArrayFilterSpec::new(["tags"])).is_ok());
        assert!(
            allow
                .check_search_fields(&SearchFilterSpec::new(["title", "body"]))
                .is_err()
        );
    }
}
