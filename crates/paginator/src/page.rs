//! Pagination envelope and link building.
//!
//! A [`Page`] wraps one page of results together with the total count and the
//! URLs of the adjacent pages. Links are derived from the request URL: only
//! `offset` changes, every other parameter is carried over so that paging
//! keeps the same filters, search and ordering.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::PaginatorResult;
use crate::params::RawParams;

/// Standard pagination envelope.
///
/// Serializes to a JSON object with exactly the keys `count`, `next`,
/// `previous` and `results`; absent links become `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of matching items, not the page size.
    pub count: u64,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub previous: Option<String>,
    /// The items of this page.
    pub results: T,
}

impl<T> Page<T> {
    /// Maps the results, keeping count and links.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnOnce(T) -> U,
    {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: f(self.results),
        }
    }
}

/// Builds [`Page`] envelopes for one request URL.
///
/// The builder owns a copy of the URL and its query parameters; the caller's
/// URL is never modified.
///
/// # Example
///
/// ```rust
/// use paginator::PageLinkBuilder;
///
/// let builder = PageLinkBuilder::parse("http://localhost/items?status=open&offset=100").unwrap();
/// let page = builder.build(Vec::<u32>::new(), 100, 100, 250);
///
/// assert_eq!(page.next.as_deref(), Some("http://localhost/items?offset=200&status=open"));
/// assert_eq!(page.previous.as_deref(), Some("http://localhost/items?offset=0&status=open"));
/// ```
#[derive(Debug, Clone)]
pub struct PageLinkBuilder {
    url: Url,
    params: RawParams,
}

impl PageLinkBuilder {
    /// Creates a builder from the request URL.
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.clone(),
            params: RawParams::from_url(url),
        }
    }

    /// Parses the request URL and creates a builder.
    pub fn parse(url: &str) -> PaginatorResult<Self> {
        Ok(Self::new(&Url::parse(url)?))
    }

    /// Returns the request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Wraps `results` in a [`Page`] with links for the given position.
    pub fn build<T>(&self, results: T, limit: u64, offset: u64, count: u64) -> Page<T> {
        let next = self.next_url(offset, limit, count);
        let previous = self.previous_url(offset, limit);

        debug!(
            count,
            offset,
            limit,
            has_next = next.is_some(),
            has_previous = previous.is_some(),
            "Built page links"
        );

        Page {
            count,
            next,
            previous,
            results,
        }
    }

    /// Returns the next page URL, if items remain after this page.
    ///
    /// A zero `limit` has no next page.
    pub fn next_url(&self, offset: u64, limit: u64, count: u64) -> Option<String> {
        if limit == 0 {
            return None;
        }
        let next_offset = offset.checked_add(limit)?;
        (next_offset < count).then(|| self.url_with_offset(next_offset))
    }

    /// Returns the previous page URL, if this page does not start at 0.
    ///
    /// The previous offset never goes below 0. A zero `limit` has no
    /// previous page.
    pub fn previous_url(&self, offset: u64, limit: u64) -> Option<String> {
        (offset > 0 && limit > 0).then(|| self.url_with_offset(offset.saturating_sub(limit)))
    }

    /// Returns the request URL with `offset` replaced and the query re-encoded
    /// with sorted keys.
    pub fn url_with_offset(&self, offset: u64) -> String {
        let mut params = self.params.clone();
        params.set("offset", offset.to_string());

        let mut url = self.url.clone();
        url.set_query(Some(&params.to_query()));
        url.to_string()
    }
}

/// Wraps `results` in a [`Page`] with links derived from `url`.
pub fn create_page<T>(url: &Url, results: T, limit: u64, offset: u64, count: u64) -> Page<T> {
    PageLinkBuilder::new(url).build(results, limit, offset, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(url: &str) -> PageLinkBuilder {
        PageLinkBuilder::parse(url).unwrap()
    }

    fn offset_of(link: &str) -> Option<u64> {
        let url = Url::parse(link).unwrap();
        RawParams::from_url(&url)
            .first("offset")
            .and_then(|v| v.parse().ok())
    }

    #[test]
    fn test_next_on_first_page() {
        let page = builder("http://example.com/items").build((), 100, 0, 250);
        assert_eq!(
            page.next.as_deref(),
            Some("http://example.com/items?offset=100")
        );
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_no_next_on_last_page() {
        let page = builder("http://example.com/items").build((), 100, 200, 250);
        assert!(page.next.is_none());
        assert_eq!(page.previous.as_deref().and_then(offset_of), Some(100));
    }

    #[test]
    fn test_no_next_when_page_ends_exactly_at_count() {
        let page = builder("http://example.com/items").build((), 100, 100, 200);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_previous_to_zero() {
        let page = builder("http://example.com/items?offset=100").build((), 100, 100, 250);
        assert_eq!(page.previous.as_deref().and_then(offset_of), Some(0));
    }

    #[test]
    fn test_previous_clamped_to_zero() {
        let page = builder("http://example.com/items?offset=50").build((), 100, 50, 250);
        assert_eq!(page.previous.as_deref().and_then(offset_of), Some(0));
    }

    #[test]
    fn test_no_previous_at_start() {
        let page = builder("http://example.com/items").build((), 100, 0, 0);
        assert!(page.previous.is_none());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_links_preserve_other_params() {
        let page = builder(
            "https://api.example.com/v1/items?status=a&status=b&search=hello%20world&ordering=-id&limit=10",
        )
        .build((), 10, 10, 100);

        assert_eq!(
            page.next.as_deref(),
            Some(
                "https://api.example.com/v1/items?limit=10&offset=20&ordering=-id&search=hello+world&status=a&status=b"
            )
        );
        assert_eq!(
            page.previous.as_deref(),
            Some(
                "https://api.example.com/v1/items?limit=10&offset=0&ordering=-id&search=hello+world&status=a&status=b"
            )
        );
    }

    #[test]
    fn test_request_url_not_modified() {
        let url = Url::parse("http://example.com/items?offset=100").unwrap();
        let page = create_page(&url, (), 100, 100, 300);
        assert!(page.next.is_some());
        assert_eq!(url.as_str(), "http://example.com/items?offset=100");
    }

    #[test]
    fn test_build_is_idempotent() {
        let b = builder("http://example.com/items?z=1&a=2");
        let first = b.build((), 10, 10, 100);
        let second = b.build((), 10, 10, 100);
        assert_eq!(first.next, second.next);
        assert_eq!(first.previous, second.previous);
    }

    #[test]
    fn test_next_offset_overflow_is_absent() {
        let page = builder("http://example.com/items").build((), u64::MAX, 1, u64::MAX);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_zero_limit_has_no_links() {
        let page = builder("http://example.com/items").build((), 0, 10, 50);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_serialize_envelope() {
        let page = builder("http://example.com/items").build(vec![1, 2], 2, 0, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [1, 2]
            })
        );
    }

    #[test]
    fn test_map_results() {
        let page = builder("http://example.com/items").build(vec![1, 2], 2, 0, 10);
        let mapped = page.map(|r| r.len());
        assert_eq!(mapped.results, 2);
        assert!(mapped.next.is_some());
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(PageLinkBuilder::parse("/relative/path").is_err());
    }
}
