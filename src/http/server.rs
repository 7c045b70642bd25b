//! Dev server setup.
//!
//! # Responsibilities
//! - Compile the route table and content scan set from config
//! - Build the axum router: one catch-all handler consulting the table
//! - Forward matched requests (plain or upgrade per rule)
//! - Fall through to the local static asset service on no match
//! - Serve with graceful shutdown

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::DevConfig;
use crate::content::ScanSet;
use crate::error::Error;
use crate::http::forward;
use crate::http::upgrade;
use crate::http::HttpClient;
use crate::routing::RouteTable;

/// State injected into the catch-all handler.
#[derive(Clone)]
struct AppState {
    table: Arc<RouteTable>,
    client: HttpClient,
    assets: ServeDir<ServeFile>,
}

/// The assembled dev server: route table, upstream client and static
/// asset fallback, ready to serve.
pub struct DevServer {
    router: Router,
    table: Arc<RouteTable>,
    scan: ScanSet,
    config: DevConfig,
}

impl DevServer {
    /// Build a server from configuration. Construction is side-effect
    /// free; use [`crate::lifecycle::startup::mount`] for the one-shot
    /// process-wide entry point.
    pub fn new(config: DevConfig) -> Result<Self, Error> {
        let table = Arc::new(RouteTable::from_config(&config.routes)?);
        let scan = ScanSet::from_patterns(&config.content.scan)?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let index = config.server.static_root.join("index.html");
        let assets = ServeDir::new(&config.server.static_root).fallback(ServeFile::new(index));

        let state = AppState {
            table: table.clone(),
            client,
            assets,
        };
        let router = Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            table,
            scan,
            config,
        })
    }

    /// Run the server on the given listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.table.rules().len(),
            static_root = %self.config.server.static_root.display(),
            "dev server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("dev server stopped");
        Ok(())
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub fn scan(&self) -> &ScanSet {
        &self.scan
    }

    pub fn config(&self) -> &DevConfig {
        &self.config
    }
}

/// Catch-all handler: proxy on a route match, static assets otherwise.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();

    let Some(rule) = state.table.matches(&path) else {
        return serve_static(&state, request).await;
    };

    if upgrade::wants_upgrade(request.headers()) && rule.allow_upgrade {
        match upgrade::tunnel(&state.client, rule, request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(%path, upstream = %rule.authority, %error, "upgrade forward failed");
                (StatusCode::BAD_GATEWAY, "upstream upgrade failed").into_response()
            }
        }
    } else {
        // Upgrade intent on a plain rule is stripped by forward(); the
        // request completes as ordinary request/response.
        match forward::forward(&state.client, rule, request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(%path, upstream = %rule.authority, %error, "forward failed");
                (StatusCode::BAD_GATEWAY, "upstream request failed").into_response()
            }
        }
    }
}

async fn serve_static(state: &AppState, request: Request<Body>) -> Response {
    match state.assets.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
