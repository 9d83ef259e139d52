//! secrets
//!
//! Credential loading for the Trello API.
//!
//! # Architecture
//!
//! Secrets are read once at startup through the [`SecretSource`] trait:
//!
//! - [`EnvSecretSource`]: reads the process environment (production)
//! - `HashMap<String, String>`: fixed values (tests)
//!
//! The resulting [`Credentials`] are handed to the API client at
//! construction. No other module reads secrets.
//!
//! # Security
//!
//! - [`Secret`] never prints its value through `Debug` or `Display`
//! - [`Credentials::redact`] scrubs secret values out of arbitrary text
//!   before it reaches an error message or a log line
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use mirror_tools::secrets::Credentials;
//!
//! let mut env = HashMap::new();
//! env.insert("TRELLO_KEY".to_string(), "k-123".to_string());
//! env.insert("TRELLO_TOKEN".to_string(), "t-456".to_string());
//!
//! let creds = Credentials::load(&env).unwrap();
//! assert_eq!(creds.redact("token=t-456"), "token=[REDACTED]");
//! assert!(!format!("{:?}", creds).contains("t-456"));
//! ```

mod traits;

pub use traits::{EnvSecretSource, SecretError, SecretSource};

use std::fmt;

/// Environment variable holding the Trello API key.
pub const TRELLO_KEY_VAR: &str = "TRELLO_KEY";

/// Environment variable holding the Trello API token.
pub const TRELLO_TOKEN_VAR: &str = "TRELLO_TOKEN";

/// Environment variable holding the default organization id.
pub const TRELLO_ORG_VAR: &str = "TRELLO_ORG_ID";

/// Placeholder substituted for secret values in surfaced text.
pub const REDACTED: &str = "[REDACTED]";

/// An opaque secret value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value. Only the HTTP layer should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Trello credentials plus the optional default organization.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// API key
    pub key: Secret,
    /// API token
    pub token: Secret,
    /// Organization used when the spec does not name one
    pub default_org: Option<String>,
}

impl Credentials {
    /// Build credentials from explicit values.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: Secret::new(key),
            token: Secret::new(token),
            default_org: None,
        }
    }

    /// Set the default organization id.
    pub fn with_default_org(mut self, org: Option<String>) -> Self {
        self.default_org = org;
        self
    }

    /// Load credentials from a secret source.
    ///
    /// # Errors
    ///
    /// `SecretError::Missing` if `TRELLO_KEY` or `TRELLO_TOKEN` is absent.
    pub fn load(source: &dyn SecretSource) -> Result<Self, SecretError> {
        let key = source
            .get(TRELLO_KEY_VAR)
            .ok_or_else(|| SecretError::Missing(TRELLO_KEY_VAR.into()))?;
        let token = source
            .get(TRELLO_TOKEN_VAR)
            .ok_or_else(|| SecretError::Missing(TRELLO_TOKEN_VAR.into()))?;

        Ok(Self::new(key, token).with_default_org(source.get(TRELLO_ORG_VAR)))
    }

    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, SecretError> {
        Self::load(&EnvSecretSource)
    }

    /// Replace every occurrence of the key or token in `text`.
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in [&self.key, &self.token] {
            let raw = secret.expose();
            if !raw.is_empty() {
                out = out.replace(raw, REDACTED);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn load_requires_key_first() {
        let err = Credentials::load(&env(&[])).unwrap_err();
        assert_eq!(err, SecretError::Missing("TRELLO_KEY".into()));
    }

    #[test]
    fn load_requires_token() {
        let err = Credentials::load(&env(&[("TRELLO_KEY", "abc")])).unwrap_err();
        assert_eq!(err, SecretError::Missing("TRELLO_TOKEN".into()));
    }

    #[test]
    fn load_picks_up_default_org() {
        let creds = Credentials::load(&env(&[
            ("TRELLO_KEY", "abc"),
            ("TRELLO_TOKEN", "def"),
            ("TRELLO_ORG_ID", "org-1"),
        ]))
        .unwrap();
        assert_eq!(creds.key.expose(), "abc");
        assert_eq!(creds.token.expose(), "def");
        assert_eq!(creds.default_org.as_deref(), Some("org-1"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("key-value-1", "token-value-2");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("key-value-1"));
        assert!(!debug.contains("token-value-2"));
        assert!(debug.contains(REDACTED));
    }

    #[test]
    fn redact_replaces_every_occurrence() {
        let creds = Credentials::new("kkk", "ttt");
        let text = "key=kkk&token=ttt; again ttt";
        assert_eq!(
            creds.redact(text),
            "key=[REDACTED]&token=[REDACTED]; again [REDACTED]"
        );
    }

    #[test]
    fn redact_ignores_empty_secrets() {
        let creds = Credentials::new("", "");
        assert_eq!(creds.redact("unchanged"), "unchanged");
    }
}
