//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses parse and paths are well formed
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::GuardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address '{0}' is not a valid authority (host:port)")]
    InvalidUpstreamAddress(String),

    #[error("gate.open_paths entry '{0}' must start with '/'")]
    InvalidOpenPath(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("timeouts.connect_secs must be greater than zero")]
    ZeroConnectTimeout,

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    // Hostnames are allowed upstream, so validate as an HTTP authority
    if Authority::from_str(&config.upstream.address).is_err() {
        errors.push(ValidationError::InvalidUpstreamAddress(
            config.upstream.address.clone(),
        ));
    }

    for path in &config.gate.open_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidOpenPath(path.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GuardConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_addresses() {
        let mut config = GuardConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.upstream.address = "http://has-a-scheme:80".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidBindAddress(
            "not-an-address".to_string()
        )));
        assert!(errors.contains(&ValidationError::InvalidUpstreamAddress(
            "http://has-a-scheme:80".to_string()
        )));
    }

    #[test]
    fn test_open_paths_must_be_absolute() {
        let mut config = GuardConfig::default();
        config.gate.open_paths.push("docs".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidOpenPath("docs".to_string())]
        );
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = GuardConfig::default();
        config.listener.bind_address = "bad".to_string();
        config.timeouts.request_secs = 0;
        config.timeouts.connect_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_hostname_upstream_is_valid() {
        let mut config = GuardConfig::default();
        config.upstream.address = "backend.internal:3000".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
