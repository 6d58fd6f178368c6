//! Shared-secret handling for the gate.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Resolution state of the configured gateway secret.
#[derive(Clone)]
pub enum SecretState {
    /// No secret provisioned; gating is disabled.
    Disabled,

    /// A secret is provisioned and enforced on every guarded request.
    Enforced(GatewaySecret),

    /// The secret could not be resolved from configuration. Fails closed:
    /// behaves like a configured secret that never matches.
    Unresolvable,
}

impl SecretState {
    /// Build the state from an optionally configured value.
    ///
    /// Empty and absent values both disable enforcement; that is an explicit
    /// operational mode for deployments where no secret has been provisioned.
    pub fn from_configured(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Enforced(GatewaySecret::new(v)),
            _ => Self::Disabled,
        }
    }
}

impl std::fmt::Debug for SecretState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "SecretState::Disabled"),
            Self::Enforced(_) => write!(f, "SecretState::Enforced([REDACTED])"),
            Self::Unresolvable => write!(f, "SecretState::Unresolvable"),
        }
    }
}

/// The shared secret known only to the trusted front-end proxy.
///
/// Wraps `SecretString` so the value cannot leak through `Debug` output and
/// is zeroed on drop. Comparison goes through `subtle::ConstantTimeEq`:
/// both buffers are examined in full regardless of where they first differ,
/// so response timing reveals nothing about the secret's content.
#[derive(Clone)]
pub struct GatewaySecret(SecretString);

impl GatewaySecret {
    pub fn new(value: String) -> Self {
        Self(SecretString::from(value))
    }

    /// Constant-time comparison against a candidate header value.
    ///
    /// `ct_eq` returns false for unequal lengths without an early exit.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }
}

impl std::fmt::Debug for GatewaySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GatewaySecret([REDACTED])")
    }
}
