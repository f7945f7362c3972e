//! Cookie jar persisted between runs.
//!
//! LinkedIn sessions live entirely in cookies. After a successful login the
//! jar is written to `<cookie_dir>/<username>.json`:
//!
//! ```json
//! {
//!   "saved_at": "2026-10-16T09:12:44Z",
//!   "cookies": {
//!     "JSESSIONID": { "value": "\"ajax:4812...\"", "expires": "2027-01-14T09:12:44Z" },
//!     "li_at":      { "value": "AQEDAR..." }
//!   }
//! }
//! ```
//!
//! `JSESSIONID` doubles as the CSRF token: every API request must echo its
//! value (without quotes) in the `csrf-token` header.

use crate::error::Result;
use crate::transport::ResponseCookie;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "JSESSIONID";

/// A single cookie value with its optional expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    /// Whether the cookie has not expired at `now`. Session cookies never
    /// expire.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_none_or(|exp| exp > now)
    }
}

/// Name-keyed cookie collection with disk persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    /// When the jar was last written to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    cookies: BTreeMap<String, StoredCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a jar from `path`.
    ///
    /// Returns `None` when the file does not exist. A file that cannot be
    /// parsed is treated the same way (with a warning) so a corrupt cache
    /// only costs a fresh login.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "no cached cookies");
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        match serde_json::from_str(&data) {
            Ok(jar) => Ok(Some(jar)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable cookie cache");
                Ok(None)
            }
        }
    }

    /// Save the jar to `path`, creating parent directories if needed.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.saved_at = Some(Utc::now());
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        debug!(path = %path.display(), cookies = self.cookies.len(), "cookie cache written");
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(
            name.into(),
            StoredCookie {
                value: value.into(),
                expires: None,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|c| c.value.as_str())
    }

    /// Store a cookie set by a response.
    ///
    /// `max_age` wins over `expires`. A cookie that is already expired at
    /// `now` (including a zero `max_age`) deletes any stored cookie of the
    /// same name.
    pub fn apply(&mut self, cookie: &ResponseCookie, now: DateTime<Utc>) {
        if cookie.name.is_empty() {
            return;
        }
        let expires = match cookie.max_age {
            Some(age) => TimeDelta::from_std(age)
                .ok()
                .and_then(|d| now.checked_add_signed(d)),
            None => cookie.expires,
        };
        if expires.is_some_and(|exp| exp <= now) {
            debug!(name = %cookie.name, "cookie expired by server");
            self.cookies.remove(&cookie.name);
            return;
        }
        self.cookies.insert(
            cookie.name.clone(),
            StoredCookie {
                value: cookie.value.clone(),
                expires,
            },
        );
    }

    /// Apply every cookie of a response.
    pub fn apply_all(&mut self, cookies: &[ResponseCookie], now: DateTime<Utc>) {
        for cookie in cookies {
            self.apply(cookie, now);
        }
    }

    /// Overwrite cookies with the ones from `other`.
    pub fn merge(&mut self, other: CookieJar) {
        self.cookies.extend(other.cookies);
    }

    /// Build the `Cookie` request header from the cookies still live at
    /// `now`. `None` when nothing is left to send.
    pub fn cookie_header(&self, now: DateTime<Utc>) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|(_, c)| c.is_live(now))
            .map(|(name, c)| format!("{name}={}", c.value))
            .collect();
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }

    /// CSRF token derived from `JSESSIONID`, surrounding quotes stripped.
    pub fn csrf_token(&self) -> Option<String> {
        self.value(CSRF_COOKIE)
            .map(|v| v.trim_matches('"').to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Whether the jar can back a session at `now`: it must carry a
    /// `JSESSIONID` that has not expired.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.get(CSRF_COOKIE).is_some_and(|c| c.is_live(now))
    }
}
