//! Fixture transport for unit tests.

use crate::auth::Session;
use crate::client::LinkedinClient;
use crate::config::ClientConfig;
use crate::cookies::CookieJar;
use crate::error::Result;
use crate::evade::Evade;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

type Route = Box<dyn Fn(&HttpRequest) -> HttpResponse>;

/// Answers every request through `route` and records what was sent.
pub struct FakeTransport {
    route: Route,
    log: Rc<RefCell<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new(route: impl Fn(&HttpRequest) -> HttpResponse + 'static) -> Self {
        Self {
            route: Box::new(route),
            log: Rc::default(),
        }
    }

    /// Shared handle on the request log, valid after the transport is boxed.
    pub fn log(&self) -> Rc<RefCell<Vec<HttpRequest>>> {
        Rc::clone(&self.log)
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.log.borrow_mut().push(request.clone());
        Ok((self.route)(request))
    }
}

/// Config pointing the cookie cache at `dir`, with no evasion delay.
pub fn test_config(dir: &Path) -> ClientConfig {
    ClientConfig {
        cookie_dir: Some(dir.to_path_buf()),
        evade: Evade::disabled(),
        ..ClientConfig::default()
    }
}

/// Client over a [`FakeTransport`] with a ready-made session, plus the
/// request log.
pub fn client_with(
    route: impl Fn(&HttpRequest) -> HttpResponse + 'static,
) -> (LinkedinClient, Rc<RefCell<Vec<HttpRequest>>>) {
    let config = ClientConfig {
        evade: Evade::disabled(),
        ..ClientConfig::default()
    };
    client_with_config(config, route)
}

/// [`client_with`] using `config`.
pub fn client_with_config(
    config: ClientConfig,
    route: impl Fn(&HttpRequest) -> HttpResponse + 'static,
) -> (LinkedinClient, Rc<RefCell<Vec<HttpRequest>>>) {
    let transport = FakeTransport::new(route);
    let log = transport.log();
    let mut jar = CookieJar::new();
    jar.insert("JSESSIONID", "\"ajax:test\"");
    jar.insert("li_at", "token");
    let session = Session::from_jar(jar).expect("jar has JSESSIONID");
    (
        LinkedinClient::with_transport(Box::new(transport), session, config),
        log,
    )
}

/// Request path after the API base URL.
pub fn path_of(req: &HttpRequest) -> &str {
    req.url
        .strip_prefix(crate::config::API_BASE_URL)
        .unwrap_or(&req.url)
}
