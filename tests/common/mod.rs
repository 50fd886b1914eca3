//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use ecommerce_connector::config::ConnectorConfig;
use ecommerce_connector::http::HttpServer;
use ecommerce_connector::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Request head as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    /// Sequence number of the TCP connection the request arrived on.
    pub connection: usize,
}

#[allow(dead_code)]
impl CapturedRequest {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Lowercased header names in arrival order.
    pub fn header_names(&self) -> Vec<String> {
        self.headers.iter().map(|(n, _)| n.to_ascii_lowercase()).collect()
    }

    /// Request target, e.g. `/heatmap/index.jsp?x=1`.
    pub fn target(&self) -> &str {
        self.request_line.split(' ').nth(1).unwrap_or_default()
    }
}

/// Canned backend reply.
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub content_type: Option<&'static str>,
    /// Serve further requests on the same connection.
    pub keep_alive: bool,
    /// Send only this many body bytes, then close (Content-Length still announces the full body).
    pub truncate_to: Option<usize>,
}

#[allow(dead_code)]
impl MockReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: None,
            keep_alive: false,
            truncate_to: None,
        }
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.keep_alive = true;
        self
    }

    pub fn truncated_to(mut self, sent: usize) -> Self {
        self.truncate_to = Some(sent);
        self
    }
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start a programmable mock backend on an ephemeral port.
///
/// Every request head is recorded before `reply` decides the answer.
pub async fn start_programmable_backend<F>(reply: F) -> (SocketAddr, Captured)
where
    F: Fn(&CapturedRequest) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let reply = Arc::new(reply);

    let log = captured.clone();
    tokio::spawn(async move {
        let mut connections = 0;
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    connections += 1;
                    let connection = connections;
                    let reply = reply.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        serve_connection(socket, connection, reply.as_ref(), &log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

async fn read_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    Some(String::from_utf8_lossy(&buf).to_string())
}

async fn serve_connection<F>(mut socket: TcpStream, connection: usize, reply: &F, log: &Captured)
where
    F: Fn(&CapturedRequest) -> MockReply,
{
    while let Some(head) = read_head(&mut socket).await {
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers = lines
            .take_while(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
            .collect();
        let request = CapturedRequest {
            request_line,
            headers,
            connection,
        };

        let answer = reply(&request);
        log.lock().unwrap().push(request);

        let reason = StatusCode::from_u16(answer.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown");
        let content_type = answer
            .content_type
            .map(|ct| format!("Content-Type: {}\r\n", ct))
            .unwrap_or_default();
        let body = answer.body.as_bytes();
        let sent = answer.truncate_to.map_or(body.len(), |n| n.min(body.len()));
        let head = format!(
            "HTTP/1.1 {} {}\r\n{}Content-Length: {}\r\nConnection: {}\r\n\r\n",
            answer.status,
            reason,
            content_type,
            body.len(),
            if answer.keep_alive { "keep-alive" } else { "close" },
        );

        if socket.write_all(head.as_bytes()).await.is_err()
            || socket.write_all(&body[..sent]).await.is_err()
        {
            return;
        }
        if !answer.keep_alive || sent < body.len() {
            break;
        }
    }

    let _ = socket.shutdown().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Config pointing the proxy at `backend`.
pub fn proxy_config(backend: SocketAddr) -> ConnectorConfig {
    let mut config = ConnectorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backend.url = format!("http://{}", backend);
    config.observability.metrics_enabled = false;
    config
}

/// Run the proxy on an ephemeral port.
pub async fn start_proxy(config: ConnectorConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never reuses connections or goes through a system proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
