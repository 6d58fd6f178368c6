//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forward handler
//! - Wire up middleware (gate, tracing, timeout, request ID)
//! - Bind server to listener
//! - Forward allowed requests to the upstream backend

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{resolve_secret, GuardConfig};
use crate::gate::{gateway_secret_middleware, Gate, GateState};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;

/// Application state injected into the forward handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: String,
}

/// HTTP server for the gateway guard.
pub struct HttpServer {
    router: Router,
    config: GuardConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The gate is built once here; its secret state and open-path set are
    /// immutable for the life of the server.
    pub fn new(config: GuardConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let gate = Arc::new(Gate::new(
            resolve_secret(&config.gate),
            config.gate.open_paths.clone(),
        ));

        let state = AppState {
            client,
            upstream: config.upstream.address.clone(),
        };

        let router = Self::build_router(&config, state, GateState { gate });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The gate layer sits directly around the forward handler; request ID,
    /// timeout, and trace layers wrap it so rejections are logged and timed
    /// like any other response.
    fn build_router(config: &GuardConfig, state: AppState, gate: GateState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate, gateway_secret_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}

/// Forward handler: the downstream stage the gate hands allowed requests to.
/// Rewrites the URI authority to the upstream and returns its response
/// verbatim.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Forwarding request"
    );

    let authority = match Authority::from_str(&state.upstream) {
        Ok(a) => a,
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %state.upstream,
                "Invalid upstream address"
            );
            metrics::record_request(&method, 502, start_time);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    // URI rewrite: same path and query, upstream host
    let (mut parts, body) = request.into_parts();
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    let uri = Uri::from_parts(uri_parts).unwrap_or_else(|_| parts.uri.clone());
    parts.uri = uri;

    let outbound = Request::from_parts(parts, body);

    match state.client.request(outbound).await {
        Ok(response) => {
            let status = response.status().as_u16();
            metrics::record_request(&method, status, start_time);

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_request(&method, 502, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for a shutdown trigger: Ctrl+C or the lifecycle coordinator.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        // A closed channel means the coordinator is gone; shut down too
        _ = shutdown.recv() => {},
    }
    tracing::info!("Shutdown signal received");
}
