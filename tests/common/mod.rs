//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use coi_serve::{HttpServer, ServeConfig, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What a mock upstream writes back after reading the request head.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Reply {
    /// `200 OK` with `Content-Length`.
    Fixed(Vec<u8>),
    /// `200 OK` with chunked transfer encoding and no length.
    Chunked(Vec<Vec<u8>>),
    /// Declares `declared` bytes but closes after sending `body`.
    Truncated { declared: usize, body: Vec<u8> },
    /// Arbitrary status line with a short body.
    Status(&'static str, &'static str),
    /// Reads the request, then holds the connection open without answering.
    Silent,
}

/// Read up to the end of the request head and return it.
async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

async fn write_reply(socket: &mut TcpStream, reply: &Reply) -> std::io::Result<()> {
    match reply {
        Reply::Fixed(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await?;
            socket.write_all(body).await?;
        }
        Reply::Chunked(chunks) => {
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n")
                .await?;
            for chunk in chunks {
                socket.write_all(format!("{:x}\r\n", chunk.len()).as_bytes()).await?;
                socket.write_all(chunk).await?;
                socket.write_all(b"\r\n").await?;
                socket.flush().await?;
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            socket.write_all(b"0\r\n\r\n").await?;
        }
        Reply::Truncated { declared, body } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                declared
            );
            socket.write_all(head.as_bytes()).await?;
            socket.write_all(body).await?;
        }
        Reply::Status(status, body) => {
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await?;
        }
        Reply::Silent => {
            tokio::time::sleep(Duration::from_secs(120)).await;
        }
    }
    socket.shutdown().await
}

/// Start a mock upstream that answers every request with `reply`.
#[allow(dead_code)]
pub async fn start_upstream(reply: Reply) -> SocketAddr {
    start_programmable_upstream(move |_head| {
        let reply = reply.clone();
        async move { reply }
    })
    .await
}

/// Start a mock upstream whose reply depends on the request head.
#[allow(dead_code)]
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let head = read_request_head(&mut socket).await;
                        let reply = f(head).await;
                        let _ = write_reply(&mut socket, &reply).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Config for a test server serving `root`, isolated from any system proxy.
#[allow(dead_code)]
pub fn test_config(root: &Path) -> ServeConfig {
    let mut config = ServeConfig::default();
    config.files.root = root.to_path_buf();
    config.proxy.connect_timeout_secs = 2;
    config.proxy.use_env_proxy = false;
    config
}

/// Start the server on an ephemeral port serving `root`.
#[allow(dead_code)]
pub async fn start_server(root: &Path) -> (SocketAddr, Shutdown) {
    start_server_with(test_config(root)).await
}

/// Start the server on an ephemeral port with an explicit config.
#[allow(dead_code)]
pub async fn start_server_with(config: ServeConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// `/proxy/...` path for `url`.
#[allow(dead_code)]
pub fn proxy_path(url: &str) -> String {
    format!("/proxy/{}", STANDARD.encode(url))
}

/// Client that never goes through a system proxy or reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Both cross-origin isolation headers are present.
pub fn assert_isolated(res: &reqwest::Response) {
    assert_eq!(res.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(res.headers()["cross-origin-opener-policy"], "same-origin");
}
