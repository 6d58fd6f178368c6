//! Gate middleware.
//! Enforces the gateway secret before the forward handler runs.

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderName, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::gate::{Decision, Gate};
use crate::observability::metrics;

/// Header carrying the shared secret from the trusted front-end proxy.
/// Lookup is case-insensitive per standard header semantics.
pub const X_GATEWAY_SECRET: HeaderName = HeaderName::from_static("x-gateway-secret");

/// State required by the gate middleware.
#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<Gate>,
}

pub async fn gateway_secret_middleware(
    State(state): State<GateState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Absent header is treated as an empty candidate, never as an error
    let provided = request
        .headers()
        .get(&X_GATEWAY_SECRET)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match state
        .gate
        .evaluate(request.uri().path(), request.method(), provided)
    {
        Decision::Forward => {
            metrics::record_decision("forward");
            next.run(request).await
        }
        Decision::Reject => {
            // Never log or echo the provided value
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Gateway secret missing or invalid"
            );
            metrics::record_decision("reject");
            (StatusCode::FORBIDDEN, Json(json!({"detail": "Forbidden"}))).into_response()
        }
    }
}
