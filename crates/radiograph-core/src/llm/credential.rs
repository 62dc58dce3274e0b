//! API credential handling.
//!
//! The secret is resolved from config (usually an `${ENV_VAR}` reference),
//! held in memory only, and never printed.

use std::fmt;

use crate::error::InitializationError;

/// Opaque secret used to authorize calls to the inference service.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a literal secret. Empty strings are rejected.
    pub fn new(secret: impl Into<String>) -> Result<Self, InitializationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(InitializationError::MissingCredential {
                var: "api_key".to_string(),
            });
        }
        Ok(Self(secret))
    }

    /// Resolve a config value, expanding `${ENV_VAR}` references.
    pub fn resolve(raw: &str) -> Result<Self, InitializationError> {
        match env_var_name(raw) {
            Some(var) => match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
                _ => Err(InitializationError::MissingCredential {
                    var: var.to_string(),
                }),
            },
            None => Self::new(raw),
        }
    }

    /// Borrow the secret for use in a request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

fn env_var_name(value: &str) -> Option<&str> {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
}
