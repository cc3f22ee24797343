//! Axum extractors for list endpoints.
//!
//! - [`ListQuery`] - Parse list query parameters and build page envelopes

mod list_query;

pub use list_query::ListQuery;
