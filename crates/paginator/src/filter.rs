//! Predicate fragments for array filters and free-text search.
//!
//! Both builders are pure string formatting. Field names and values are
//! interpolated literally, without escaping or quoting beyond the fragment's
//! own syntax. A field name or value taken from user input can produce an
//! invalid or unsafe predicate: callers must only declare field names they
//! control (see [`FieldAllowList`](crate::FieldAllowList)) and the storage
//! backend is responsible for anything dialect specific.
//!
//! # Example
//!
//! ```rust
//! use paginator::{ArrayFilterSpec, RawParams, SearchFilterSpec};
//!
//! let params = RawParams::from_query("source=a&source=b&status=open");
//! let (remainder, predicate) = ArrayFilterSpec::new(["source"]).split(&params);
//! assert_eq!(predicate.as_deref(), Some("source @> '{a', 'b'}'"));
//! assert!(!remainder.contains("source"));
//!
//! let search = SearchFilterSpec::new(["title", "body"]).build("x");
//! assert_eq!(
//!     search.as_deref(),
//!     Some("lower(title) LIKE lower('%x%') OR lower(body) LIKE lower('%x%')")
//! );
//! ```

use std::fmt;

use tracing::debug;

use crate::params::RawParams;

/// The operator of a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateOp {
    /// Array containment: the field contains all of the values.
    Contains(Vec<String>),
    /// Case-insensitive substring match.
    ILike(String),
}

/// A single predicate fragment: a field, an operator and its values.
///
/// `Display` renders the SQL-like form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// The field the predicate applies to.
    pub field: String,
    /// Operator and operand values.
    pub op: PredicateOp,
}

impl Predicate {
    /// Creates an array containment predicate.
    pub fn contains(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            op: PredicateOp::Contains(values),
        }
    }

    /// Creates a case-insensitive substring predicate.
    pub fn ilike(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: PredicateOp::ILike(term.into()),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            PredicateOp::Contains(values) if values.len() > 1 => {
                write!(f, "{} @> '{{{}'}}'", self.field, values.join("', '"))
            }
            PredicateOp::Contains(values) => {
                write!(f, "{} @> '{{{}}}'", self.field, values.concat())
            }
            PredicateOp::ILike(term) => {
                write!(f, "lower({}) LIKE lower('%{}%')", self.field, term)
            }
        }
    }
}

fn join(predicates: &[Predicate], separator: &str) -> Option<String> {
    if predicates.is_empty() {
        return None;
    }
    Some(
        predicates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator),
    )
}

/// Declared array fields, matched with containment predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayFilterSpec {
    fields: Vec<String>,
}

impl ArrayFilterSpec {
    /// Creates a spec from field names, kept in the given order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the declared fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns one containment predicate per declared field present in
    /// `params`, in declaration order.
    pub fn predicates(&self, params: &RawParams) -> Vec<Predicate> {
        self.fields
            .iter()
            .filter_map(|field| {
                params
                    .get_all(field)
                    .map(|values| Predicate::contains(field.as_str(), values.to_vec()))
            })
            .collect()
    }

    /// Builds the containment predicates joined with `AND`.
    ///
    /// Returns `None` if no declared field is present.
    pub fn build(&self, params: &RawParams) -> Option<String> {
        join(&self.predicates(params), " AND ")
    }

    /// Builds the predicate and returns a copy of `params` without the
    /// declared fields.
    pub fn split(&self, params: &RawParams) -> (RawParams, Option<String>) {
        let predicate = self.build(params);

        let mut remainder = params.clone();
        for field in &self.fields {
            remainder.remove(field);
        }

        debug!(
            fields = ?self.fields,
            predicate = predicate.as_deref().unwrap_or(""),
            "Split array filters"
        );

        (remainder, predicate)
    }
}

/// Declared search fields, matched with case-insensitive `LIKE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilterSpec {
    fields: Vec<String>,
}

impl SearchFilterSpec {
    /// Creates a spec from field names, kept in the given order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the declared fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns one predicate per declared field, or none for an empty term.
    pub fn predicates(&self, term: &str) -> Vec<Predicate> {
        if term.is_empty() {
            return Vec::new();
        }
        self.fields
            .iter()
            .map(|field| Predicate::ilike(field.as_str(), term))
            .collect()
    }

    /// Builds the search predicates joined with `OR`.
    ///
    /// Returns `None` if the term is empty or no field is declared.
    pub fn build(&self, term: &str) -> Option<String> {
        join(&self.predicates(term), " OR ")
    }
}
