//! Login flow and session state.
//!
//! # Flow
//!
//! 1. Reuse the cached cookie jar unless `refresh_cookies` is set or the
//!    cached `JSESSIONID` has expired. No request is made in that case.
//! 2. `GET {auth}/uas/authenticate` to collect seed cookies (`JSESSIONID`,
//!    `bcookie`, ...).
//! 3. `POST {auth}/uas/authenticate` with the form body
//!    `session_key=<user>&session_password=<pass>&JSESSIONID=<seed>`.
//!
//! The POST answers JSON:
//!
//! ```json
//! { "login_result": "PASS" }
//! ```
//!
//! Any other `login_result` (`CHALLENGE`, `BAD_PASSWORD`, ...) means LinkedIn
//! wants an extra verification step and is reported as
//! [`LinkedinError::Challenge`].

use crate::config::ClientConfig;
use crate::cookies::{CSRF_COOKIE, CookieJar};
use crate::error::{LinkedinError, Result};
use crate::transport::{HttpRequest, Transport};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

const AUTH_PATH: &str = "/uas/authenticate";

/// Headers of the mobile login client the auth endpoint expects.
const AUTH_HEADERS: [(&str, &str); 5] = [
    ("X-Li-User-Agent", "LIAuthLibrary:3.2.4 com.linkedin.LinkedIn:8.8.1 iPhone:8.3"),
    ("User-Agent", "LinkedIn/8.8.1 CFNetwork/711.3.18 Darwin/14.0.0"),
    ("X-User-Language", "en"),
    ("X-User-Locale", "en_US"),
    ("Accept-Language", "en-us"),
];

/// Authenticated session: cookie jar plus the CSRF token derived from it.
#[derive(Debug, Clone)]
pub struct Session {
    cookies: CookieJar,
    csrf_token: String,
}

impl Session {
    /// Build a session from a jar that carries `JSESSIONID`.
    pub fn from_jar(cookies: CookieJar) -> Result<Self> {
        let csrf_token = cookies
            .csrf_token()
            .ok_or(LinkedinError::MissingCookie(CSRF_COOKIE))?;
        Ok(Self {
            cookies,
            csrf_token,
        })
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Value for the `Cookie` request header, built from the cookies that
    /// have not expired yet.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookies.cookie_header(Utc::now())
    }
}

/// Runs the login flow against a [`Transport`].
pub struct Authenticator<'a> {
    transport: &'a dyn Transport,
    config: &'a ClientConfig,
}

impl<'a> Authenticator<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Produce a session for `username`, from cache or a fresh login.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Unauthorized`] — bad credentials (HTTP 401)
    /// - [`LinkedinError::Challenge`] — verification step required
    /// - [`LinkedinError::Status`] — any other non-200 login response
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let path = self.config.cookie_path(username)?;

        if self.config.refresh_cookies {
            debug!("cookie refresh forced");
        } else if let Some(jar) = CookieJar::load(&path)? {
            if jar.is_usable(Utc::now()) {
                debug!(path = %path.display(), "using cached cookies");
                return Session::from_jar(jar);
            }
            info!("cached cookies expired, logging in again");
        }

        let mut jar = self.seed_cookies()?;
        let fresh = self.login(username, password, &jar)?;
        jar.merge(fresh);
        jar.save(&path)?;
        info!(username, "authenticated");
        Session::from_jar(jar)
    }

    fn seed_cookies(&self) -> Result<CookieJar> {
        let url = format!("{}{AUTH_PATH}", self.config.auth_base_url);
        let resp = self.transport.execute(&with_auth_headers(HttpRequest::get(url)))?;
        let mut jar = CookieJar::new();
        jar.apply_all(&resp.cookies, Utc::now());
        if jar.value(CSRF_COOKIE).is_none() {
            warn!(status = resp.status, "login page returned no JSESSIONID");
            return Err(LinkedinError::MissingCookie(CSRF_COOKIE));
        }
        Ok(jar)
    }

    fn login(&self, username: &str, password: &str, seed: &CookieJar) -> Result<CookieJar> {
        let jsessionid = seed.value(CSRF_COOKIE).unwrap_or_default();
        let body = format!(
            "session_key={}&session_password={}&JSESSIONID={}",
            urlencoding::encode(username),
            urlencoding::encode(password),
            urlencoding::encode(jsessionid),
        );
        let url = format!("{}{AUTH_PATH}", self.config.auth_base_url);

        let mut req = with_auth_headers(HttpRequest::post(url, Some(body)))
            .header("Content-Type", "application/x-www-form-urlencoded");
        if let Some(cookie) = seed.cookie_header(Utc::now()) {
            req = req.header("Cookie", cookie);
        }

        let resp = self.transport.execute(&req)?;
        if resp.status == 401 {
            return Err(LinkedinError::Unauthorized);
        }

        let login_result = resp
            .json()
            .ok()
            .and_then(|v| v.get("login_result").and_then(Value::as_str).map(String::from));
        if let Some(result) = login_result.filter(|r| r != "PASS") {
            warn!(%result, "login requires a challenge");
            return Err(LinkedinError::Challenge(result));
        }

        if resp.status != 200 {
            return Err(LinkedinError::Status {
                status: resp.status,
                endpoint: AUTH_PATH.to_owned(),
            });
        }

        let mut jar = CookieJar::new();
        jar.apply_all(&resp.cookies, Utc::now());
        Ok(jar)
    }
}

fn with_auth_headers(mut req: HttpRequest) -> HttpRequest {
    for (name, value) in AUTH_HEADERS {
        req = req.header(name, value);
    }
    req
}
