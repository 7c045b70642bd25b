//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use axum::body::Body;
use axum::extract::ws::WebSocketUpgrade;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use dev_proxy::config::RouteConfig;
use dev_proxy::{DevConfig, DevServer, Shutdown};

/// Start an upstream that echoes the method, path, query and Host header
/// it received. Returns the bound address.
pub async fn start_echo_upstream() -> SocketAddr {
    let app = Router::new().fallback(|request: Request<Body>| async move {
        let host = request
            .headers()
            .get("host")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-")
            .to_string();
        format!(
            "method={} path={} query={} host={}",
            request.method(),
            request.uri().path(),
            request.uri().query().unwrap_or("-"),
            host
        )
    });
    serve(app).await
}

/// Start an upstream that accepts WebSocket connections on any path and
/// echoes every message back. Plain requests are rejected by the upgrade
/// extractor.
#[allow(dead_code)]
pub async fn start_ws_echo_upstream() -> SocketAddr {
    let app = Router::new().fallback(|ws: WebSocketUpgrade| async move {
        let response: Response = ws.on_upgrade(|mut socket| async move {
            while let Some(Ok(message)) = socket.recv().await {
                if socket.send(message).await.is_err() {
                    break;
                }
            }
        });
        response
    });
    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a dev server for the given config on an ephemeral port.
///
/// The returned `Shutdown` must be held for the duration of the test:
/// dropping it stops the server.
pub async fn start_dev_server(config: DevConfig) -> (SocketAddr, Shutdown) {
    let server = DevServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

/// Route entry pointing at a test upstream.
pub fn route(prefix: &str, upstream: SocketAddr, rewrite_origin: bool, allow_upgrade: bool) -> RouteConfig {
    RouteConfig {
        path_prefix: prefix.to_string(),
        target: format!("http://{upstream}"),
        rewrite_origin,
        allow_upgrade,
    }
}

/// Config with the given routes and a static root.
pub fn config_with_routes(routes: Vec<RouteConfig>, static_root: &Path) -> DevConfig {
    let mut config = DevConfig::default();
    config.routes = routes;
    config.server.static_root = static_root.to_path_buf();
    config
}

/// Non-pooled client so each request observes the server's current state.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
