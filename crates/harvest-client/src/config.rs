use crate::error::ClientError;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "HARVEST_API_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Create a config pointing at `base_url`.
    ///
    /// Trailing slashes are stripped so `url_for` can join cleanly.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        Ok(ClientConfig { base_url })
    }

    /// Read the base URL from `HARVEST_API_BASE_URL`, falling back to the
    /// local development server.
    pub fn from_env() -> Result<Self, ClientError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    ///
    /// Absolute URLs pass through untouched so payment gateway redirects
    /// can be followed as-is.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(matches!(
            ClientConfig::new("ftp://api.example.com"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("api.example.com"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_url_for_joins_paths() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(
            config.url_for("/get_products/?page=1"),
            "http://localhost:8000/get_products/?page=1"
        );
        assert_eq!(
            config.url_for("get_cart/abc123/"),
            "http://localhost:8000/get_cart/abc123/"
        );
    }

    #[test]
    fn test_url_for_passes_absolute_urls() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(
            config.url_for("https://checkout.paystack.com/xyz"),
            "https://checkout.paystack.com/xyz"
        );
    }
}
