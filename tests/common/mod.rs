//! Local HTTP stub for integration tests.
//!
//! Serves a fixed list of canned responses, one per connection, in order,
//! and records every request it sees. Responses carry `Connection: close`
//! so each request opens its own connection.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pizzashop::prelude::*;
use pizzashop::routes::{NavigateOptions, Navigator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: String::new(),
        }
    }

    pub fn error(status: u16, code: &str, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "code": code, "message": message }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            let mut queue = responses.into_iter();
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let response = queue
                    .next()
                    .unwrap_or_else(|| StubResponse::error(500, "NO_STUB", "no response queued"));
                handle(stream, response, &recorded).await;
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path?query"` for each request, in arrival order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn client(&self) -> PizzaShopClient {
        PizzaShopClient::builder()
            .base_url(&self.base_url)
            .build()
            .unwrap()
    }
}

async fn handle(
    mut stream: TcpStream,
    response: StubResponse,
    recorded: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    recorded.lock().unwrap().push(RecordedRequest { method, path, body });

    let raw = if response.status == 204 {
        "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
    } else {
        format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response.status,
            response.body.len(),
            response.body
        )
    };
    stream.write_all(raw.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub fn order_row(id: &str, status: &str, customer: &str, total: i64) -> serde_json::Value {
    serde_json::json!({
        "orderId": id,
        "createdAt": "2024-03-10T18:30:00.000Z",
        "status": status,
        "customerName": customer,
        "total": total,
    })
}

pub fn orders_body(rows: Vec<serde_json::Value>) -> serde_json::Value {
    let total_count = rows.len();
    serde_json::json!({
        "orders": rows,
        "meta": { "pageIndex": 0, "perPage": 10, "totalCount": total_count },
    })
}

/// Navigator that records every call.
#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<(String, NavigateOptions)>>);

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<(String, NavigateOptions)> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: &str, options: NavigateOptions) {
        self.0.lock().unwrap().push((to.to_string(), options));
    }
}
