//! Query parameter parsing.
//!
//! Converts the raw, multi-valued query parameters of a list request into a
//! [`QueryDirective`] that a storage backend can execute.
//!
//! # Processing Order
//!
//! Each step consumes its keys from a working copy before the next one runs:
//!
//! 1. `offset` and `limit` (pagination)
//! 2. `ordering`
//! 3. `search`
//! 4. everything left becomes an equality filter (first value wins)
//!
//! Array filter fields that should keep all of their values must be split off
//! before step 4, see [`ParamParser::parse_with_array_filters`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};
use url::{Url, form_urlencoded};

use crate::filter::ArrayFilterSpec;

/// Parameter names consumed by the parser; they never reach the filter map.
pub const RESERVED_PARAMS: [&str; 4] = ["offset", "limit", "ordering", "search"];

/// Default page size when `limit` is absent, invalid or zero.
pub const DEFAULT_LIMIT: u64 = 100;

/// Raw query parameters: every key maps to a non-empty list of values in the
/// order they were received.
///
/// Keys are kept sorted, so re-encoding a `RawParams` is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(BTreeMap<String, Vec<String>>);

impl RawParams {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. Keys without `=` get an empty value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Decodes the query component of a URL.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Appends a value to a key, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all values of a key with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Removes a key, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key)
    }

    /// Returns the first value of a key.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// Returns all values of a key.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Checks if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over keys (sorted) and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Encodes the parameters as a form-urlencoded query string, keys sorted.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl From<BTreeMap<String, Vec<String>>> for RawParams {
    /// Keys with an empty value list are dropped.
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}

/// Sort direction of an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the lowercase keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A parsed `ordering` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// The field to order by.
    pub field: String,
    /// The direction.
    pub direction: SortDirection,
}

impl Ordering {
    /// Parses `field` (ascending) or `-field` (descending).
    ///
    /// Returns `None` when no field name is left, so `""` and `"-"` mean
    /// unordered rather than an ordering on an empty field (`" desc"`).
    pub fn parse(value: &str) -> Option<Self> {
        let (field, direction) = match value.strip_prefix('-') {
            Some(field) => (field, SortDirection::Desc),
            None => (value, SortDirection::Asc),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_str())
    }
}

/// The normalized result of parsing a list request's query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDirective {
    /// Equality filters: field name to the first value received.
    pub filter: BTreeMap<String, String>,
    /// Free-text search term, empty when not searching.
    pub search: String,
    /// Requested ordering.
    pub ordering: Option<Ordering>,
    /// Number of items to skip.
    pub offset: u64,
    /// Page size, always at least 1.
    pub limit: u64,
}

impl QueryDirective {
    /// Returns the ordering as `"<field> <asc|desc>"`, or `""` when unordered.
    pub fn ordering_clause(&self) -> String {
        self.ordering
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Returns true if a search term was given.
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }
}

/// Options for [`ParamParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Limit used when `limit` is absent, invalid or zero.
    pub default_limit: u64,
    /// Optional upper bound on `limit`.
    pub max_limit: Option<u64>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

/// Parses raw query parameters into a [`QueryDirective`].
///
/// Parsing never fails: malformed pagination values fall back to defaults and
/// absent parameters become empty values.
///
/// # Example
///
/// ```rust
/// use paginator::{ParamParser, RawParams};
///
/// let params = RawParams::from_query("offset=abc&search=hello&status=a&status=b");
/// let directive = ParamParser::new().parse(&params);
///
/// assert_eq!(directive.offset, 0);
/// assert_eq!(directive.limit, 100);
/// assert_eq!(directive.search, "hello");
/// assert_eq!(directive.filter["status"], "a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamParser {
    options: ParserOptions,
}

impl ParamParser {
    /// Creates a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Returns the parser options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses the given parameters. The caller's map is not modified.
    pub fn parse(&self, params: &RawParams) -> QueryDirective {
        let mut working = params.clone();

        let (offset, limit) = self.take_pagination(&mut working);
        let ordering = take_ordering(&mut working);
        let search = take_search(&mut working);
        let filter = take_filter(working);

        let directive = QueryDirective {
            filter,
            search,
            ordering,
            offset,
            limit,
        };

        debug!(
            offset = directive.offset,
            limit = directive.limit,
            ordering = %directive.ordering_clause(),
            search = %directive.search,
            filters = directive.filter.len(),
            "Parsed query parameters"
        );

        directive
    }

    /// Parses a raw query string.
    pub fn parse_query(&self, query: &str) -> QueryDirective {
        self.parse(&RawParams::from_query(query))
    }

    /// Splits off the declared array fields first, then parses the remainder.
    ///
    /// Returns the directive together with the containment predicate for the
    /// array fields, so multi-valued array parameters are not collapsed to
    /// their first value by the equality filter step.
    pub fn parse_with_array_filters(
        &self,
        params: &RawParams,
        array_fields: &ArrayFilterSpec,
    ) -> (QueryDirective, Option<String>) {
        let (remainder, array_predicate) = array_fields.split(params);
        (self.parse(&remainder), array_predicate)
    }

    fn take_pagination(&self, params: &mut RawParams) -> (u64, u64) {
        let offset = params
            .remove("offset")
            .and_then(|v| parse_first(&v))
            .unwrap_or(0);

        let mut limit = params
            .remove("limit")
            .and_then(|v| parse_first(&v))
            .filter(|&limit| limit > 0)
            .unwrap_or(self.options.default_limit.max(1));

        if let Some(max) = self.options.max_limit {
            limit = limit.min(max.max(1));
        }

        (offset, limit)
    }
}

fn parse_first(values: &[String]) -> Option<u64> {
    let value = values.first()?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            trace!(value = %value, "Ignoring non-numeric pagination value");
            None
        }
    }
}

fn take_ordering(params: &mut RawParams) -> Option<Ordering> {
    params
        .remove("ordering")
        .and_then(|v| v.into_iter().next())
        .and_then(|v| Ordering::parse(&v))
}

fn take_search(params: &mut RawParams) -> String {
    params
        .remove("search")
        .and_then(|v| v.into_iter().next())
        .unwrap_or_default()
}

fn take_filter(params: RawParams) -> BTreeMap<String, String> {
    params
        .0
        .into_iter()
        .filter_map(|(key, values)| values.into_iter().next().map(|first| (key, first)))
        .collect()
}
