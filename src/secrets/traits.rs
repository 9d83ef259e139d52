//! secrets::traits
//!
//! Secret source trait definition.
//!
//! # Design
//!
//! The `SecretSource` trait is a read-only key lookup. Keys are the
//! environment variable names the tools document (e.g., `TRELLO_KEY`).
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include secrets in error messages
//! - Be thread-safe (Send + Sync)

use std::collections::HashMap;

use thiserror::Error;

/// Errors from loading secrets.
///
/// Note: Error messages intentionally do not include secret values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    /// A required secret is absent or empty.
    #[error("Missing required environment variable: {0}")]
    Missing(String),
}

/// A read-only source of secret values.
pub trait SecretSource: Send + Sync {
    /// Look up a secret by key. Empty values are treated as absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads secrets from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretSource;

impl SecretSource for EnvSecretSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl SecretSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).filter(|v| !v.is_empty()).cloned()
    }
}
