//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable)
//!
//! Secret resolution (at server construction):
//!     API_GATEWAY_SECRET env var, else file value
//!     → SecretState (Disabled / Enforced / Unresolvable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Unresolvable secrets fail closed at the gate, not at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_secret, ConfigError, SECRET_ENV_VAR};
pub use schema::{GateConfig, GuardConfig, ListenerConfig, UpstreamConfig};
