//! A minimal canned-response HTTP server for exercising the sync adapter
//! and the CLI without a network. One thread accepts connections until
//! the test process exits; every request is recorded for assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub target: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(&self.target)
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or("")
    }
}

/// (method, path without query) → (status, body)
pub type Routes = HashMap<(String, String), (u16, String)>;

pub struct MockServer {
    addr: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub fn start(route_list: Vec<(&str, &str, u16, String)>) -> MockServer {
        let mut routes: Routes = HashMap::new();
        for (method, path, status, body) in route_list {
            routes.insert((method.to_string(), path.to_string()), (status, body));
        }

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = format!("http://{}", listener.local_addr().unwrap());
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let routes = Arc::new(routes);
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || {
                    let _ = handle_connection(stream, &routes, &recorded);
                });
            }
        });

        MockServer { addr, requests }
    }

    /// Base URL for the client config
    pub fn url(&self) -> String {
        self.addr.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path() == path)
            .collect()
    }
}

fn handle_connection(
    stream: TcpStream,
    routes: &Routes,
    recorded: &Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut stream = stream;

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(());
    }
    let mut parts = request_line.trim_end().splitn(3, ' ');
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body_bytes = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body_bytes)?;
    }
    let body = String::from_utf8_lossy(&body_bytes).to_string();

    let request = RecordedRequest {
        method: method.clone(),
        target: target.clone(),
        headers,
        body,
    };
    recorded.lock().unwrap().push(request.clone());

    let (status, response_body) = routes
        .get(&(method, request.path().to_string()))
        .cloned()
        .unwrap_or((404, r#"{"message": "Not Found"}"#.to_string()));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        response_body.len(),
        response_body
    );
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

// ---------------------------------------------------------------------------
// Canned payloads
// ---------------------------------------------------------------------------

/// An issue JSON object in the remote's shape
pub fn issue_json(number: u64, title: &str, body: &str, closed: bool) -> String {
    format!(
        r#"{{
            "number": {},
            "title": {},
            "body": {},
            "state": "{}",
            "created_at": "2026-08-01T09:30:00Z"
        }}"#,
        number,
        serde_json::to_string(title).unwrap(),
        serde_json::to_string(body).unwrap(),
        if closed { "closed" } else { "open" }
    )
}

/// Like `issue_json` but carrying the pull-request marker
pub fn pull_request_json(number: u64, title: &str) -> String {
    format!(
        r#"{{
            "number": {},
            "title": {},
            "body": null,
            "state": "open",
            "created_at": "2026-08-01T09:30:00Z",
            "pull_request": {{ "url": "https://example.invalid/pulls/{}" }}
        }}"#,
        number,
        serde_json::to_string(title).unwrap(),
        number
    )
}

/// A standard three-entry listing: one open issue, one closed issue, one
/// pull request.
pub fn standard_listing() -> String {
    format!(
        "[{}, {}, {}]",
        issue_json(12, "Write the report", "with charts", false),
        pull_request_json(11, "A sneaky pull request"),
        issue_json(10, "Old chore", "", true)
    )
}
