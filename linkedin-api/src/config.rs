//! Client configuration.

use crate::error::{LinkedinError, Result};
use crate::evade::Evade;
use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE_URL: &str = "https://www.linkedin.com/voyager/api";
pub const SALES_API_BASE_URL: &str = "https://www.linkedin.com/sales-api";
pub const AUTH_BASE_URL: &str = "https://www.linkedin.com";

/// Default cap on pagination round-trips per page of results wanted.
pub const MAX_REPEATED_REQUESTS: usize = 200;

/// Settings shared by authentication and every API call.
///
/// ```no_run
/// use linkedin_api::{ClientConfig, LinkedinClient};
///
/// let config = ClientConfig {
///     proxy: Some("http://127.0.0.1:8080".into()),
///     ..ClientConfig::default()
/// };
/// let client = LinkedinClient::new("me@example.com", "hunter2", config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL prepended to every API path.
    pub api_base_url: String,
    /// Base URL of the login flow.
    pub auth_base_url: String,
    /// Directory holding cached cookie jars. `None` uses
    /// `<cache dir>/linkedin-api` (e.g. `~/.cache/linkedin-api` on Linux).
    pub cookie_dir: Option<PathBuf>,
    /// Ignore cached cookies and always log in again.
    pub refresh_cookies: bool,
    /// Proxy URL applied to all requests.
    pub proxy: Option<String>,
    /// Random pause before each API request.
    pub evade: Evade,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pagination stops once it has issued `ceil(limit / page) * this` requests.
    pub max_repeated_requests: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_owned(),
            auth_base_url: AUTH_BASE_URL.to_owned(),
            cookie_dir: None,
            refresh_cookies: false,
            proxy: None,
            evade: Evade::default(),
            timeout: Duration::from_secs(30),
            max_repeated_requests: MAX_REPEATED_REQUESTS,
        }
    }
}

impl ClientConfig {
    /// Preset for the Sales Navigator API, which shares the login flow.
    pub fn sales_navigator() -> Self {
        Self {
            api_base_url: SALES_API_BASE_URL.to_owned(),
            ..Self::default()
        }
    }

    /// Path of the cookie jar cached for `username`.
    pub fn cookie_path(&self, username: &str) -> Result<PathBuf> {
        let dir = match &self.cookie_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| LinkedinError::Other("cannot determine cache directory".into()))?
                .join("linkedin-api"),
        };
        Ok(dir.join(format!("{}.json", sanitize_file_stem(username))))
    }
}

fn sanitize_file_stem(username: &str) -> String {
    username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_path_uses_username() {
        let config = ClientConfig {
            cookie_dir: Some(PathBuf::from("/tmp/jar")),
            ..ClientConfig::default()
        };
        let path = config.cookie_path("jane.doe@example.com").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/jar/jane.doe@example.com.json"));
    }

    #[test]
    fn cookie_path_strips_separators() {
        let config = ClientConfig {
            cookie_dir: Some(PathBuf::from("/tmp/jar")),
            ..ClientConfig::default()
        };
        let path = config.cookie_path("../evil/name").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/jar/.._evil_name.json"));
    }

    #[test]
    fn sales_navigator_only_changes_api_base() {
        let config = ClientConfig::sales_navigator();
        assert_eq!(config.api_base_url, SALES_API_BASE_URL);
        assert_eq!(config.auth_base_url, AUTH_BASE_URL);
        assert_eq!(config.max_repeated_requests, MAX_REPEATED_REQUESTS);
    }
}
