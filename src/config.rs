//! Configuration options for the marketplace client

use std::env;
use std::time::Duration;

use crate::error::Error;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "PLATEFORME_API_URL";
/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "PLATEFORME_TIMEOUT_SECS";
/// Environment variable holding the catalogue page size
pub const PAGE_SIZE_ENV: &str = "PLATEFORME_PAGE_SIZE";

/// How the route guard decides whether a user is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    /// Ask the backend identity endpoint on every guarded navigation
    Fresh,
    /// Trust the last published session and the session cookie expiry
    Cached,
}

/// Configuration options for the client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Number of entities per catalogue page
    pub page_size: usize,

    /// User agent sent with every request
    pub user_agent: String,

    /// Route guard strategy
    pub guard_mode: GuardMode,

    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,

    /// Largest number of major works a designer may hold
    pub max_major_works: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            page_size: 50,
            user_agent: format!("plateforme-client/{}", env!("CARGO_PKG_VERSION")),
            guard_mode: GuardMode::Fresh,
            max_upload_bytes: 3 * 1024 * 1024,
            max_major_works: 5,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the catalogue page size; zero is bumped to one
    pub fn with_page_size(mut self, value: usize) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }

    /// Set the route guard strategy
    pub fn with_guard_mode(mut self, value: GuardMode) -> Self {
        self.guard_mode = value;
        self
    }

    /// Set the upload size limit
    pub fn with_max_upload_bytes(mut self, value: usize) -> Self {
        self.max_upload_bytes = value;
        self
    }

    /// Set the major works limit
    pub fn with_max_major_works(mut self, value: usize) -> Self {
        self.max_major_works = value;
        self
    }
}

/// Base URL plus options, usually loaded from the environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub options: ClientOptions,
}

impl ClientConfig {
    /// Creates a configuration, validating the URL.
    pub fn new(api_url: &str, options: ClientOptions) -> Result<Self, Error> {
        let parsed = url::Url::parse(api_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported scheme `{}` in API URL",
                parsed.scheme()
            )));
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            options,
        })
    }

    /// Attempts to create configuration from environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let api_url = env::var(API_URL_ENV).map_err(|_| {
            Error::config(format!("{} environment variable not found", API_URL_ENV))
        })?;

        let mut options = ClientOptions::default();
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{} must be a number of seconds", TIMEOUT_ENV))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }
        if let Ok(raw) = env::var(PAGE_SIZE_ENV) {
            let size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    Error::config(format!("{} must be a positive integer", PAGE_SIZE_ENV))
                })?;
            options = options.with_page_size(size);
        }

        Self::new(&api_url, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            ClientConfig::new("http://localhost:8080/api/", ClientOptions::default()).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://example.com", ClientOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn page_size_never_zero() {
        assert_eq!(ClientOptions::default().with_page_size(0).page_size, 1);
    }
}
