//! # paginator-rest - Axum Integration for List Endpoints
//!
//! This crate connects [`paginator`] to [Axum](https://docs.rs/axum): an
//! extractor that turns a request's query string into a
//! [`QueryDirective`](paginator::QueryDirective), and a configuration type for
//! page sizes, declared array/search fields and an optional field allow-list.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use axum::{Json, Router, routing::get};
//! use paginator::Page;
//! use paginator_rest::{RestConfig, extractors::ListQuery, init_logging};
//!
//! async fn list_items(query: ListQuery) -> Json<Page<Vec<String>>> {
//!     let (items, count) = load_items(query.directive()).await;
//!     Json(query.page(items, count))
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RestConfig::from_env();
//!     init_logging(&config.log_level);
//!
//!     let app = Router::new()
//!         .route("/items", get(list_items))
//!         .with_state(Arc::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Response Body
//!
//! Handlers return the envelope as JSON:
//!
//! ```json
//! {
//!   "count": 250,
//!   "next": "http://localhost:8080/items?limit=100&offset=100",
//!   "previous": null,
//!   "results": [...]
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Configuration
//! - [`error`] - Error types and JSON error responses
//! - [`extractors`] - Axum extractors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;

pub use config::RestConfig;
pub use error::{RestError, RestResult};
pub use extractors::ListQuery;

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. This should be called
/// once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("paginator={},paginator_rest={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
