//! Gateway Guard Library
//!
//! A shared-secret request gate that sits in front of an HTTP backend:
//! requests reach the upstream only if they carry the secret known to the
//! trusted front-end proxy, or target an explicitly open path.

pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GuardConfig;
pub use gate::{Decision, Gate, SecretState};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
