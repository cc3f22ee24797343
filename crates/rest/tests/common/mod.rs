//! Common test utilities for list endpoint testing.
//!
//! Provides a small in-memory item store and a test server whose `/items`
//! route filters, orders and pages it using [`ListQuery`].

#![allow(dead_code)]

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use axum_test::TestServer;
use paginator::{Page, SortDirection};
use paginator_rest::{RestConfig, extractors::ListQuery};
use serde_json::{Value, json};
use url::Url;

/// Test items: ids 1..=7, alternating status.
pub fn items() -> Vec<Value> {
    (1..=7)
        .map(|id| {
            json!({
                "id": id.to_string(),
                "status": if id % 2 == 1 { "open" } else { "closed" },
                "title": format!("Item {}", id)
            })
        })
        .collect()
}

/// Lists items the way a storage backend would execute a directive.
async fn list_items(query: ListQuery) -> Json<Page<Vec<Value>>> {
    let directive = query.directive();

    let mut matching: Vec<Value> = items()
        .into_iter()
        .filter(|item| {
            directive
                .filter
                .iter()
                .all(|(field, value)| item[field.as_str()] == *value)
        })
        .filter(|item| {
            directive.search.is_empty()
                || item["title"]
                    .as_str()
                    .is_some_and(|t| t.to_lowercase().contains(&directive.search.to_lowercase()))
        })
        .collect();

    if let Some(ordering) = &directive.ordering {
        if ordering.direction == SortDirection::Desc {
            matching.reverse();
        }
    }

    let count = matching.len() as u64;
    let results = matching
        .into_iter()
        .skip(directive.offset as usize)
        .take(directive.limit as usize)
        .collect();

    Json(query.page(results, count))
}

/// Builds the `/items` router for the given configuration.
pub fn app(config: RestConfig) -> Router {
    Router::new()
        .route("/items", get(list_items))
        .with_state(Arc::new(config))
}

/// Creates a test server for the given configuration.
pub fn server(config: RestConfig) -> TestServer {
    TestServer::new(app(config)).expect("Failed to create test server")
}

/// Returns the path and sorted query pairs of a link.
pub fn link_parts(link: &Value) -> (String, Vec<(String, String)>) {
    let url = Url::parse(link.as_str().expect("link should be a string")).unwrap();
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.sort();
    (url.path().to_string(), pairs)
}

/// Returns the ids of the items in a page body.
pub fn result_ids(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default().to_string())
        .collect()
}
