//! Secret gate subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → middleware.rs (extract path, method, X-Gateway-Secret header)
//!     → Gate::evaluate (ordered short-circuit checks)
//!     → Forward: hand request to the inner handler unchanged
//!     → Reject: 403 {"detail": "Forbidden"}, nothing else disclosed
//! ```
//!
//! # Design Decisions
//! - Secret and open paths are injected at construction; the gate never
//!   reads ambient process state
//! - Every request is evaluated independently; decisions are never cached
//! - Fail closed: an unresolvable secret rejects all guarded requests

pub mod middleware;
pub mod secret;

pub use middleware::{gateway_secret_middleware, GateState, X_GATEWAY_SECRET};
pub use secret::{GatewaySecret, SecretState};

use std::collections::HashSet;

use axum::http::Method;

/// Outcome of a single gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request to the downstream handler unchanged.
    Forward,
    /// Stop the request with a 403 response.
    Reject,
}

/// The gating check applied to every inbound request.
///
/// Holds only immutable configuration; evaluation is pure and lock-free,
/// so a single instance is shared across all request tasks via `Arc`.
pub struct Gate {
    secret: SecretState,
    open_paths: HashSet<String>,
}

impl Gate {
    pub fn new(secret: SecretState, open_paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            secret,
            open_paths: open_paths.into_iter().collect(),
        }
    }

    /// Decide whether a request may pass.
    ///
    /// Checks run in a fixed order and short-circuit on the first match:
    /// 1. Gating disabled (no secret provisioned) → forward
    /// 2. Path is in the open set (exact match) → forward
    /// 3. CORS preflight (`OPTIONS`) → forward; preflights carry no custom
    ///    headers and blocking them breaks cross-origin negotiation
    /// 4. Header matches the secret in constant time → forward, else reject
    pub fn evaluate(&self, path: &str, method: &Method, provided: &str) -> Decision {
        if matches!(self.secret, SecretState::Disabled) {
            return Decision::Forward;
        }

        if self.open_paths.contains(path) {
            return Decision::Forward;
        }

        if method == Method::OPTIONS {
            return Decision::Forward;
        }

        match &self.secret {
            SecretState::Enforced(secret) if secret.matches(provided) => Decision::Forward,
            _ => Decision::Reject,
        }
    }
}
