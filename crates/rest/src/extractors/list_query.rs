//! List query extractor.
//!
//! Parses the query parameters of a list request into a [`QueryDirective`]
//! and keeps the absolute request URL for building page links.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OriginalUri},
    http::{Uri, request::Parts},
};
use paginator::{Page, PageLinkBuilder, PaginatorError, ParamParser, QueryDirective, RawParams};
use tracing::debug;
use url::Url;

use crate::config::RestConfig;
use crate::error::{RestError, RestResult};

/// Axum extractor for list requests.
///
/// The router state must provide an `Arc<RestConfig>` through [`FromRef`].
/// Declared array fields are split off before the equality filters are
/// collected, and the search term is projected through the declared search
/// fields. When an allow-list is configured, filter and ordering fields
/// outside of it are rejected with `400 Bad Request`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::Json;
/// use paginator::Page;
/// use paginator_rest::extractors::ListQuery;
///
/// async fn list_items(query: ListQuery) -> Json<Page<Vec<Item>>> {
///     let directive = query.directive();
///     let (items, count) = store.find(directive).await;
///     Json(query.page(items, count))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListQuery {
    directive: QueryDirective,
    array_predicate: Option<String>,
    search_predicate: Option<String>,
    links: PageLinkBuilder,
}

impl ListQuery {
    /// Builds a list query from a request URI (absolute or origin-form).
    ///
    /// Origin-form URIs are resolved against the configured base URL.
    pub fn from_uri(uri: &Uri, config: &RestConfig) -> RestResult<Self> {
        let url = absolute_url(uri, config)?;
        let params = RawParams::from_url(&url);

        let parser = ParamParser::with_options(config.parser_options());
        let (directive, array_predicate) =
            parser.parse_with_array_filters(&params, &config.array_filter());

        if let Some(allow) = config.allow_list() {
            allow.check_directive(&directive)?;
        }

        let search_predicate = config.search_filter().build(&directive.search);

        debug!(
            url = %url,
            array_predicate = array_predicate.as_deref().unwrap_or(""),
            search_predicate = search_predicate.as_deref().unwrap_or(""),
            "Extracted list query"
        );

        Ok(Self {
            directive,
            array_predicate,
            search_predicate,
            links: PageLinkBuilder::new(&url),
        })
    }

    /// Returns the parsed directive.
    pub fn directive(&self) -> &QueryDirective {
        &self.directive
    }

    /// Consumes the extractor and returns the directive.
    pub fn into_directive(self) -> QueryDirective {
        self.directive
    }

    /// Returns the containment predicate for the declared array fields.
    pub fn array_predicate(&self) -> Option<&str> {
        self.array_predicate.as_deref()
    }

    /// Returns the search predicate for the declared search fields.
    pub fn search_predicate(&self) -> Option<&str> {
        self.search_predicate.as_deref()
    }

    /// Returns the absolute request URL.
    pub fn url(&self) -> &Url {
        self.links.url()
    }

    /// Wraps a page of results for this request.
    pub fn page<T>(&self, results: T, count: u64) -> Page<T> {
        self.links
            .build(results, self.directive.limit, self.directive.offset, count)
    }
}

fn absolute_url(uri: &Uri, config: &RestConfig) -> RestResult<Url> {
    if uri.scheme().is_some() {
        return Url::parse(&uri.to_string()).map_err(|e| PaginatorError::from(e).into());
    }

    // Only path and query come from the request; scheme and host stay
    // those of base_url even for paths like "//other.host/".
    let mut url = Url::parse(&config.base_url).map_err(PaginatorError::from)?;
    url.set_path(uri.path());
    url.set_query(uri.query());
    Ok(url)
}

impl<S> FromRequestParts<S> for ListQuery
where
    Arc<RestConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<RestConfig>::from_ref(state);

        // Nested routers strip their prefix from parts.uri
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());

        ListQuery::from_uri(&uri, &config)
    }
}
