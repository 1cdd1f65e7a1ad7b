//! Local HTTP server answering every request with one canned response

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub(crate) struct CannedServer {
    pub(crate) base_url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Bind to an ephemeral port and serve `status` / `body` until the test ends
    pub(crate) async fn start(
        status: &'static str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let request_lines = Arc::new(Mutex::new(Vec::new()));
        let seen = request_lines.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                // Read the request head; no request we send carries a body
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&chunk[..n]),
                    }
                }
                if let Some(line) = String::from_utf8_lossy(&head).lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let response_head = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    content_type,
                    body.len()
                );
                let _ = socket.write_all(response_head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            request_lines,
        }
    }

    /// Request lines (`GET /path?query HTTP/1.1`) received so far
    pub(crate) fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}
