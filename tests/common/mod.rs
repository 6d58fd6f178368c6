//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use gateway_guard::config::GuardConfig;
use gateway_guard::http::HttpServer;
use gateway_guard::lifecycle::Shutdown;

/// Start a mock upstream backend that answers every request with 200 and a
/// fixed body. Returns the address it is listening on.
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Spawn a guard in front of the given upstream, with an optional secret.
///
/// The returned `Shutdown` must be kept alive for the duration of the test;
/// dropping it stops the server.
pub async fn spawn_guard(secret: Option<&str>, upstream: SocketAddr) -> (SocketAddr, Shutdown) {
    let mut config = GuardConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.address = upstream.to_string();
    config.gate.secret = secret.map(String::from);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

/// Client that does not reuse pooled connections between tests.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
