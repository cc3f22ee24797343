//! Configuration for list endpoints.
//!
//! Supports both programmatic configuration and environment variable
//! overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAGINATOR_BASE_URL` | http://localhost:8080 | Scheme and host used for page links |
//! | `PAGINATOR_DEFAULT_LIMIT` | 100 | Page size when `limit` is absent or invalid |
//! | `PAGINATOR_MAX_LIMIT` | unset | Upper bound on `limit` |
//! | `PAGINATOR_ARRAY_FIELDS` | (empty) | Array filter fields (comma-separated) |
//! | `PAGINATOR_SEARCH_FIELDS` | (empty) | Search fields (comma-separated) |
//! | `PAGINATOR_ALLOWED_FIELDS` | (empty) | Field allow-list, empty disables it |
//! | `PAGINATOR_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use paginator_rest::RestConfig;
//!
//! let config = RestConfig {
//!     base_url: "https://api.example.com".to_string(),
//!     search_fields: "title,body".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.search_filter().fields(), ["title", "body"]);
//! ```

use clap::Parser;
use paginator::{ArrayFilterSpec, FieldAllowList, ParserOptions, SearchFilterSpec};

/// Configuration for list endpoints.
///
/// Can be constructed from environment variables using [`RestConfig::from_env`],
/// from command line arguments using [`RestConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "paginator")]
#[command(about = "Pagination settings for JSON list endpoints")]
pub struct RestConfig {
    /// Base URL used to make page links absolute.
    #[arg(long, env = "PAGINATOR_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Page size used when `limit` is absent, invalid or zero.
    #[arg(long, env = "PAGINATOR_DEFAULT_LIMIT", default_value = "100")]
    pub default_limit: u64,

    /// Upper bound on `limit`.
    #[arg(long, env = "PAGINATOR_MAX_LIMIT")]
    pub max_limit: Option<u64>,

    /// Array filter fields (comma-separated).
    #[arg(long, env = "PAGINATOR_ARRAY_FIELDS", default_value = "")]
    pub array_fields: String,

    /// Search fields (comma-separated).
    #[arg(long, env = "PAGINATOR_SEARCH_FIELDS", default_value = "")]
    pub search_fields: String,

    /// Field allow-list (comma-separated). Empty disables the check.
    #[arg(long, env = "PAGINATOR_ALLOWED_FIELDS", default_value = "")]
    pub allowed_fields: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PAGINATOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            default_limit: 100,
            max_limit: None,
            array_fields: String::new(),
            search_fields: String::new(),
            allowed_fields: String::new(),
            log_level: "info".to_string(),
        }
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl RestConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["paginator"]).unwrap_or_default()
    }

    /// Returns the options for the parameter parser.
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }

    /// Returns the declared array filter fields.
    pub fn array_filter(&self) -> ArrayFilterSpec {
        ArrayFilterSpec::new(split_list(&self.array_fields))
    }

    /// Returns the declared search fields.
    pub fn search_filter(&self) -> SearchFilterSpec {
        SearchFilterSpec::new(split_list(&self.search_fields))
    }

    /// Returns the field allow-list, or `None` when it is disabled.
    pub fn allow_list(&self) -> Option<FieldAllowList> {
        let allow = FieldAllowList::new(split_list(&self.allowed_fields));
        (!allow.is_empty()).then_some(allow)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL is not a valid URL: {}", self.base_url));
        }

        if self.default_limit == 0 {
            errors.push("Default limit cannot be 0".to_string());
        }

        if let Some(max) = self.max_limit {
            if max == 0 {
                errors.push("Max limit cannot be 0".to_string());
            } else if self.default_limit > max {
                errors.push("Default limit cannot exceed max limit".to_string());
            }
        }

        if let Some(allow) = self.allow_list() {
            if let Err(e) = allow.check_array_fields(&self.array_filter()) {
                errors.push(format!("Array fields: {}", e));
            }
            if let Err(e) = allow.check_search_fields(&self.search_filter()) {
                errors.push(format!("Search fields: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            default_limit: 10,
            max_limit: Some(50),
            log_level: "debug".to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RestConfig::default();
        assert_eq!(config.default_limit, 100);
        assert!(config.max_limit.is_none());
        assert!(config.allow_list().is_none());
    }

    #[test]
    fn test_parser_options() {
        let options = RestConfig::for_testing().parser_options();
        assert_eq!(options.default_limit, 10);
        assert_eq!(options.max_limit, Some(50));
    }

    #[test]
    fn test_field_lists_trimmed() {
        let config = RestConfig {
            array_fields: " tags, source ,".to_string(),
            ..Default::default()
        };
        assert_eq!(config.array_filter().fields(), ["tags", "source"]);
    }

    #[test]
    fn test_validate_valid() {
        assert!(RestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_limits() {
        let config = RestConfig {
            default_limit: 100,
            max_limit: Some(50),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("max limit")));
    }

    #[test]
    fn test_validate_search_fields_against_allow_list() {
        let config = RestConfig {
            search_fields: "title,body".to_string(),
            allowed_fields: "title".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("body")));
    }

    #[test]
    fn test_validate_invalid_base_url() {
        let config = RestConfig {
            base_url: "localhost".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
