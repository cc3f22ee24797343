//! # paginator - Query Parameters and Pagination Envelopes
//!
//! This crate turns the raw query parameters of a JSON list endpoint into a
//! structured [`QueryDirective`] and wraps a page of results into a [`Page`]
//! envelope with computed `next` and `previous` links.
//!
//! ## Features
//!
//! - **Parameter parsing**: `offset`, `limit`, `ordering` and `search` are
//!   extracted and normalized; every other parameter becomes an equality filter
//! - **Pagination links**: `next`/`previous` URLs that keep the request's
//!   filter, search and ordering context
//! - **Predicate fragments**: array containment (`@>`) and case-insensitive
//!   `LIKE` fragments for a storage backend to embed
//! - **Field allow-list**: optional validation of caller-supplied field names
//!
//! ## Quick Start
//!
//! ```rust
//! use paginator::{PageLinkBuilder, ParamParser, RawParams};
//! use url::Url;
//!
//! let url = Url::parse("http://localhost:8080/items?status=open&ordering=-id&limit=10").unwrap();
//! let params = RawParams::from_url(&url);
//!
//! let directive = ParamParser::new().parse(&params);
//! assert_eq!(directive.ordering_clause(), "id desc");
//! assert_eq!(directive.limit, 10);
//! assert_eq!(directive.filter.get("status").map(String::as_str), Some("open"));
//!
//! // ... hand the directive to a storage backend, get results and a total count ...
//! let results = vec!["a", "b"];
//! let page = PageLinkBuilder::new(&url).build(results, directive.limit, directive.offset, 25);
//!
//! assert_eq!(
//!     page.next.as_deref(),
//!     Some("http://localhost:8080/items?limit=10&offset=10&ordering=-id&status=open")
//! );
//! assert!(page.previous.is_none());
//! ```
//!
//! ## Trust Boundary
//!
//! The predicate builders in [`filter`] interpolate field names and values
//! literally. Callers must only pass field names they control, or run them
//! through a [`FieldAllowList`] first.
//!
//! ## Architecture
//!
//! - [`params`] - Raw parameter map and the [`ParamParser`]
//! - [`page`] - The [`Page`] envelope and [`PageLinkBuilder`]
//! - [`filter`] - Array containment and search predicates
//! - [`validate`] - Field allow-list
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod filter;
pub mod page;
pub mod params;
pub mod validate;

pub use error::{PaginatorError, PaginatorResult};
pub use filter::{ArrayFilterSpec, Predicate, PredicateOp, SearchFilterSpec};
pub use page::{Page, PageLinkBuilder, create_page};
pub use params::{
    Ordering, ParamParser, ParserOptions, QueryDirective, RESERVED_PARAMS, RawParams,
    SortDirection,
};
pub use validate::FieldAllowList;
