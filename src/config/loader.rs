//! Configuration loading from disk and secret resolution.

use std::env::VarError;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GateConfig, GuardConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::gate::SecretState;

/// Environment variable holding the shared secret. Overrides any value in
/// the config file.
pub const SECRET_ENV_VAR: &str = "API_GATEWAY_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GuardConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the secret state for the gate.
///
/// The environment variable wins over the file value. A value that cannot
/// be read (present but not valid UTF-8) yields `Unresolvable`, which the
/// gate treats as a secret that never matches: enforcement stays on rather
/// than silently switching off.
pub fn resolve_secret(config: &GateConfig) -> SecretState {
    match std::env::var(SECRET_ENV_VAR) {
        Ok(value) => SecretState::from_configured(Some(value)),
        Err(VarError::NotPresent) => SecretState::from_configured(config.secret.clone()),
        Err(VarError::NotUnicode(_)) => {
            tracing::error!(
                var = SECRET_ENV_VAR,
                "Secret could not be resolved; failing closed"
            );
            SecretState::Unresolvable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: GuardConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [upstream]
            address = "127.0.0.1:3000"

            [gate]
            secret = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(config.gate.secret.as_deref(), Some("abc123"));
        // Unspecified sections fall back to defaults
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.gate.open_paths.len(), 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GuardConfig = toml::from_str("").unwrap();
        assert!(config.gate.secret.is_none());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_open_paths_overridable() {
        let config: GuardConfig = toml::from_str(
            r#"
            [gate]
            open_paths = ["/", "/status"]
            "#,
        )
        .unwrap();
        assert_eq!(config.gate.open_paths, vec!["/", "/status"]);
    }
}
