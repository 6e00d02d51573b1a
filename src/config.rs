//! Configuration constants and utilities for shopline
//!
//! The storefront needs two base URLs: the API the catalog and orders live
//! behind, and the CDN product images are served from. Both can be
//! overridden through the environment.

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/weblarek";

/// Default CDN base URL for product images
pub const DEFAULT_CDN_URL: &str = "http://localhost:3000/content/weblarek";

/// Environment variable name for overriding the API base URL
pub const API_URL_ENV_VAR: &str = "SHOPLINE_API_URL";

/// Environment variable name for overriding the CDN base URL
pub const CDN_URL_ENV_VAR: &str = "SHOPLINE_CDN_URL";

/// Catalog endpoint, relative to the API base
pub const PRODUCTS_PATH: &str = "/product";

/// Order submission endpoint, relative to the API base
pub const ORDERS_PATH: &str = "/order";

fn env_or(var: &str, default: &str) -> String {
    std::env::var_os(var)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Get the API base URL, checking environment variable first, then falling back to default
pub fn get_api_url() -> String {
    env_or(API_URL_ENV_VAR, DEFAULT_API_URL)
}

/// Get the CDN base URL, checking environment variable first, then falling back to default
pub fn get_cdn_url() -> String {
    env_or(CDN_URL_ENV_VAR, DEFAULT_CDN_URL)
}

/// Resolved endpoints for a storefront session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub api_url: String,
    pub cdn_url: String,
}

impl ShopConfig {
    pub fn new(api_url: impl Into<String>, cdn_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            cdn_url: cdn_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(get_api_url(), get_cdn_url())
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_overrides(mut self, api_url: Option<&str>, cdn_url: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.to_string();
        }
        if let Some(url) = cdn_url {
            self.cdn_url = url.to_string();
        }
        self
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_CDN_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_names() {
        assert_eq!(API_URL_ENV_VAR, "SHOPLINE_API_URL");
        assert_eq!(CDN_URL_ENV_VAR, "SHOPLINE_CDN_URL");
    }

    #[test]
    fn test_get_api_url_default_and_override() {
        // Save current env var state
        let original = std::env::var_os(API_URL_ENV_VAR);

        std::env::remove_var(API_URL_ENV_VAR);
        assert_eq!(get_api_url(), DEFAULT_API_URL);

        std::env::set_var(API_URL_ENV_VAR, "https://shop.example.com/api");
        assert_eq!(get_api_url(), "https://shop.example.com/api");

        // Empty values fall back to the default
        std::env::set_var(API_URL_ENV_VAR, "");
        assert_eq!(get_api_url(), DEFAULT_API_URL);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(API_URL_ENV_VAR, val),
            None => std::env::remove_var(API_URL_ENV_VAR),
        }
    }

    #[test]
    fn test_get_cdn_url_default_and_override() {
        let original = std::env::var_os(CDN_URL_ENV_VAR);

        std::env::remove_var(CDN_URL_ENV_VAR);
        assert_eq!(get_cdn_url(), DEFAULT_CDN_URL);

        std::env::set_var(CDN_URL_ENV_VAR, "https://cdn.example.com");
        assert_eq!(get_cdn_url(), "https://cdn.example.com");

        match original {
            Some(val) => std::env::set_var(CDN_URL_ENV_VAR, val),
            None => std::env::remove_var(CDN_URL_ENV_VAR),
        }
    }

    #[test]
    fn test_overrides_replace_only_given_urls() {
        let config = ShopConfig::default().with_overrides(Some("http://api.test"), None);
        assert_eq!(config.api_url, "http://api.test");
        assert_eq!(config.cdn_url, DEFAULT_CDN_URL);

        let config = ShopConfig::default().with_overrides(None, Some("http://cdn.test"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.cdn_url, "http://cdn.test");
    }
}
