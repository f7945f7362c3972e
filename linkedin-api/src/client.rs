//! HTTP dispatcher for the Voyager API.
//!
//! Every call goes through [`LinkedinClient::fetch`] or
//! [`LinkedinClient::post`], which:
//!
//! 1. sleep for the configured evasion delay,
//! 2. prefix the path with `api_base_url`,
//! 3. attach the static browser headers, the `csrf-token` and the session
//!    cookies.
//!
//! # Response format
//!
//! Endpoints answer either plain Rest.li JSON (`{"elements": [...]}`) or,
//! when asked with `accept: application/vnd.linkedin.normalized+json+2.1`,
//! the normalized envelope:
//!
//! ```json
//! {
//!   "data": { "elements": [...], "metadata": {...} },
//!   "included": [ { "entityUrn": "urn:li:fs_miniProfile:...", ... } ]
//! }
//! ```
//!
//! Failed reads often still answer 200 with `{"status": 403, "message": ...}`
//! in the body; see [`body_status`].

use crate::auth::{Authenticator, Session};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use serde_json::Value;
use tracing::{debug, info};

/// `accept` value selecting the normalized `data`/`included` envelope.
pub const NORMALIZED_JSON: &str = "application/vnd.linkedin.normalized+json+2.1";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_5) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/66.0.3359.181 Safari/537.36";

const REQUEST_HEADERS: [(&str, &str); 4] = [
    ("user-agent", USER_AGENT),
    ("accept-language", "en-AU,en-GB;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("x-li-lang", "en_US"),
    ("x-restli-protocol-version", "2.0.0"),
];

/// Blocking client for the LinkedIn Voyager API.
///
/// Holds a [`Transport`] and an authenticated [`Session`]. Endpoint methods
/// live in separate modules (`profile`, `search`, `company`, `messaging`,
/// `invitation`) as `impl LinkedinClient` blocks.
pub struct LinkedinClient {
    transport: Box<dyn Transport>,
    session: Session,
    config: ClientConfig,
}

impl LinkedinClient {
    /// Log in (or reuse cached cookies) and return a ready client.
    pub fn new(username: &str, password: &str, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::authenticate_with(Box::new(transport), username, password, config)
    }

    /// Like [`new`](Self::new) but over a caller-supplied transport.
    pub fn authenticate_with(
        transport: Box<dyn Transport>,
        username: &str,
        password: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let session = Authenticator::new(transport.as_ref(), &config).authenticate(username, password)?;
        Ok(Self::with_transport(transport, session, config))
    }

    /// Build a client from an existing session.
    pub fn with_transport(
        transport: Box<dyn Transport>,
        session: Session,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {api_base}{uri}`. `uri` includes any query string.
    pub fn fetch(&self, uri: &str, accept: Option<&str>) -> Result<HttpResponse> {
        let url = format!("{}{uri}", self.config.api_base_url);
        self.dispatch(HttpRequest::get(url), accept)
    }

    /// `POST {api_base}{uri}` with a JSON body.
    pub fn post(&self, uri: &str, body: Option<&Value>, accept: Option<&str>) -> Result<HttpResponse> {
        let url = format!("{}{uri}", self.config.api_base_url);
        let mut req = HttpRequest::post(url, body.map(Value::to_string));
        if body.is_some() {
            req = req.header("content-type", "application/json");
        }
        self.dispatch(req, accept)
    }

    /// `GET` and parse the body as JSON.
    pub fn fetch_json(&self, uri: &str, accept: Option<&str>) -> Result<Value> {
        self.fetch(uri, accept)?.json()
    }

    fn dispatch(&self, mut req: HttpRequest, accept: Option<&str>) -> Result<HttpResponse> {
        self.config.evade.pause();

        for (name, value) in REQUEST_HEADERS {
            req = req.header(name, value);
        }
        req = req.header("csrf-token", self.session.csrf_token());
        if let Some(cookie) = self.session.cookie_header() {
            req = req.header("cookie", cookie);
        }
        if let Some(accept) = accept {
            req = req.header("accept", accept);
        }

        let resp = self.transport.execute(&req)?;
        debug!(method = ?req.method, url = %req.url, status = resp.status, "voyager request");
        Ok(resp)
    }
}

/// The `status` an endpoint embedded in its JSON body, if it reports a
/// failure. Logs the accompanying message.
pub fn body_status(data: &Value) -> Option<u64> {
    let status = data.get("status").and_then(Value::as_u64)?;
    if status == 200 {
        return None;
    }
    let message = data.get("message").and_then(Value::as_str).unwrap_or("");
    info!(status, message, "request failed");
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, client_with};
    use crate::transport::{Method, ResponseCookie};
    use serde_json::json;

    #[test]
    fn fetch_attaches_session_headers() {
        let (client, log) = client_with(|_| HttpResponse::new(200, "{}"));
        client.fetch("/me", Some(NORMALIZED_JSON)).unwrap();

        let log = log.borrow();
        let req = &log[0];
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url, "https://www.linkedin.com/voyager/api/me");
        assert_eq!(req.header_value("csrf-token"), Some("ajax:test"));
        assert_eq!(req.header_value("x-restli-protocol-version"), Some("2.0.0"));
        assert_eq!(req.header_value("accept"), Some(NORMALIZED_JSON));
        assert!(req.header_value("cookie").unwrap().contains("li_at=token"));
    }

    #[test]
    fn post_sends_json() {
        let (client, log) = client_with(|_| HttpResponse::new(201, ""));
        let resp = client.post("/x", Some(&json!({ "a": 1 })), None).unwrap();
        assert_eq!(resp.status, 201);

        let log = log.borrow();
        assert_eq!(log[0].method, Method::Post);
        assert_eq!(log[0].body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(log[0].header_value("content-type"), Some("application/json"));
        assert_eq!(log[0].header_value("accept"), None);
    }

    #[test]
    fn authenticate_with_uses_transport() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new(|req| match req.method {
            Method::Get => HttpResponse::new(200, "")
                .with_cookie(ResponseCookie::new("JSESSIONID", "\"ajax:1\"")),
            Method::Post => HttpResponse::new(200, r#"{"login_result":"PASS"}"#),
        });
        let log = transport.log();
        let client = LinkedinClient::authenticate_with(
            Box::new(transport),
            "me",
            "pw",
            crate::testing::test_config(dir.path()),
        )
        .unwrap();
        assert_eq!(client.session().csrf_token(), "ajax:1");
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn body_status_detects_failures() {
        assert_eq!(body_status(&json!({ "status": 403, "message": "no" })), Some(403));
        assert_eq!(body_status(&json!({ "status": 200 })), None);
        assert_eq!(body_status(&json!({ "elements": [] })), None);
    }
}
