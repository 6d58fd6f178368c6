//! Lifecycle subsystem: graceful shutdown coordination.

pub mod shutdown;

pub use shutdown::Shutdown;
