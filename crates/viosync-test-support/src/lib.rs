//! Shared test support for viosync workspace tests.
//!
//! [`serve`] runs a `tiny_http` server on a loopback port in a background
//! thread, answers each request from a handler and records what it saw.

use std::io::Read;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tiny_http::{Header, Request, Response, Server};

/// How long the server waits for the next request before giving up.
const IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// One request as the server received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    fn capture(request: &mut Request) -> Self {
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);
        Self {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|h| (h.field.to_string(), h.value.to_string()))
                .collect(),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

/// Serve up to `requests` requests, answering each with `handler`.
///
/// Returns the base URL and a handle that yields every request seen, in
/// order. The server stops early once it has been idle for a few seconds.
pub fn serve<F>(requests: usize, handler: F) -> (String, JoinHandle<Vec<Recorded>>)
where
    F: Fn(&Recorded) -> (u16, String) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let base = format!("http://{}", server.server_addr());
    let json = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header");

    let handle = thread::spawn(move || {
        let mut seen = Vec::with_capacity(requests);
        while seen.len() < requests {
            let Ok(Some(mut request)) = server.recv_timeout(IDLE_TIMEOUT) else {
                break;
            };
            let recorded = Recorded::capture(&mut request);
            let (status, payload) = handler(&recorded);
            let response = Response::from_string(payload)
                .with_status_code(status)
                .with_header(json.clone());
            let _ = request.respond(response);
            seen.push(recorded);
        }
        seen
    });
    (base, handle)
}
