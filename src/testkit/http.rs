//! Minimal HTTP/1.1 stub server for exercising the provider clients.
//!
//! Answers every connection with the same canned response and records the
//! request head (request line plus headers) of each call.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running stub server. Stops when dropped.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// `http://127.0.0.1:<port>` without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request heads received so far, lowercased.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve `status` with a JSON `body`.
pub async fn serve(status: u16, body: &str) -> StubServer {
    serve_with_delay(status, body, Duration::ZERO).await
}

/// Serve `status` with a JSON `body` after waiting `delay`.
pub async fn serve_with_delay(status: u16, body: &str, delay: Duration) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener address");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let response = format!(
        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let recorded = Arc::clone(&requests);
    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let recorded = Arc::clone(&recorded);
            let response = response.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                recorded
                    .lock()
                    .push(String::from_utf8_lossy(&head).to_lowercase());
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubServer {
        base_url: format!("http://{addr}"),
        requests,
        handle,
    }
}
