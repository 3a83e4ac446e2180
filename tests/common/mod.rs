//! Common test utilities shared across test types
//!
//! - [`StubRequester`] - Canned responses keyed by URL suffix, records every request
//! - [`StaticServer`] - Local HTTP server that serves files and ignores `.htaccess`
//!   (request paths are percent-decoded like a real server does)

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use htcap::core::models::HttpResponse;
use htcap::core::ports::HttpRequester;
use tempfile::TempDir;

/// A canned response
#[derive(Debug, Clone)]
pub struct Canned {
    pub status_code: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Canned {
    pub fn new(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn to_response(&self) -> HttpResponse {
        let headers: HashMap<String, String> = self.headers.iter().cloned().collect();
        HttpResponse::new(self.body.clone(), self.status_code, headers)
    }
}

/// Requester answering from a suffix table, with a fallback for everything else
#[derive(Debug)]
pub struct StubRequester {
    routes: Vec<(String, Canned)>,
    fallback: Canned,
    requests: Mutex<Vec<String>>,
}

impl StubRequester {
    /// Answer every URL with `fallback`
    pub fn always(fallback: Canned) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails at the transport level
    pub fn unreachable() -> Self {
        Self::always(Canned::new(0, "The following request failed: connection refused"))
    }

    /// Answer URLs ending in `suffix` with `response`
    pub fn route(mut self, suffix: &str, response: Canned) -> Self {
        self.routes.push((suffix.to_string(), response));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpRequester for StubRequester {
    fn make_request(&self, url: &str) -> HttpResponse {
        self.requests.lock().unwrap().push(url.to_string());
        self.routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map_or_else(|| self.fallback.to_response(), |(_, canned)| canned.to_response())
    }
}

/// Share a stub with a prober while keeping a handle for assertions
pub fn shared(stub: StubRequester) -> (Arc<StubRequester>, Arc<dyn HttpRequester>) {
    let stub = Arc::new(stub);
    let requester: Arc<dyn HttpRequester> = stub.clone();
    (stub, requester)
}

/// Number of regular files below `dir`, recursively
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .map(|entry| entry.unwrap().path())
        .map(|path| if path.is_dir() { count_files(&path) } else { 1 })
        .sum()
}

/// A web root served over HTTP by a plain file server
///
/// The server knows nothing about `.htaccess`, so it behaves like an Apache
/// with `AllowOverride None`: files come back verbatim, directories are
/// answered with their `index.html` or a 404.
pub struct StaticServer {
    root: TempDir,
    url: String,
}

impl StaticServer {
    pub fn start() -> Self {
        let root = TempDir::new().unwrap();
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let served = root.path().to_path_buf();

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let response = match resolve(&served, request.url()) {
                    Some(body) => tiny_http::Response::from_string(body).with_status_code(200),
                    None => tiny_http::Response::from_string("Not Found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            root,
            url: format!("http://127.0.0.1:{port}"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn resolve(root: &Path, url: &str) -> Option<String> {
    let raw = url.split('?').next().unwrap_or_default().trim_start_matches('/');
    let mut path: PathBuf = root.join(percent_decode(raw));
    if path.is_dir() {
        path = path.join("index.html");
    }
    fs::read_to_string(path).ok()
}

/// Decode `%XX` escapes the way a web server maps a request path to a file
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| raw.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        if let Some(byte) = escaped {
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
