//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request.rs (add request ID)
//!     → gate middleware (forward or 403)
//!     → forward handler (rewrite authority, send upstream)
//!     → Upstream response returned to client verbatim
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
