//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$MIRROR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/mirror/config.toml`
//! 3. `~/.mirror/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing so that a typo surfaces at
//! startup rather than halfway through a provisioning run.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default Trello REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.trello.com/1";

/// Default words the brand linter rejects.
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &["sweat", "sweaty", "perspire", "perspiration"];

/// Default file extensions the brand linter scans.
pub const DEFAULT_SCAN_EXTENSIONS: &[&str] = &["html", "css", "js", "md"];

/// Default window for "recently modified" files, in minutes.
pub const DEFAULT_LOOKBACK_MINUTES: u64 = 60;

/// Default cap on files examined by the incomplete-work scan.
pub const DEFAULT_MAX_FILES: usize = 20;

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// [trello]
/// api_base = "https://api.trello.com/1"
/// timeout_secs = 30
///
/// [lint]
/// root = "site/src"
/// words = ["sweat", "sweaty"]
/// extensions = ["html", "md"]
///
/// [hook]
/// log_dir = ".claude/logs"
/// lookback_minutes = 30
/// max_files = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Trello API settings
    pub trello: Option<TrelloConfig>,

    /// Brand linter settings
    pub lint: Option<LintConfig>,

    /// Stop hook settings
    pub hook: Option<HookConfig>,
}

impl FileConfig {
    /// Validate every section present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(trello) = &self.trello {
            trello.validate()?;
        }
        if let Some(lint) = &self.lint {
            lint.validate()?;
        }
        if let Some(hook) = &self.hook {
            hook.validate()?;
        }
        Ok(())
    }
}

/// Trello API settings. Credentials are never read from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrelloConfig {
    /// API base URL (no trailing slash)
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl TrelloConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            if !(base.starts_with("https://") || base.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "trello.api_base must be an http(s) URL, got '{}'",
                    base
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "trello.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Brand linter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Directory to scan, relative to the working directory
    pub root: Option<String>,

    /// Forbidden words (matched case-insensitively as whole words)
    pub words: Option<Vec<String>>,

    /// File extensions to scan, without the leading dot
    pub extensions: Option<Vec<String>>,
}

impl LintConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(words) = &self.words {
            if words.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "lint.words cannot be empty".to_string(),
                ));
            }
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "lint.words cannot contain blank entries".to_string(),
                ));
            }
        }
        if let Some(exts) = &self.extensions {
            if let Some(bad) = exts.iter().find(|e| e.is_empty() || e.starts_with('.')) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid lint extension '{}': use the bare extension, e.g. \"md\"",
                    bad
                )));
            }
        }
        Ok(())
    }
}

/// Stop hook settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    /// Log directory, relative to the project directory
    pub log_dir: Option<String>,

    /// How far back a modification counts as recent
    pub lookback_minutes: Option<u64>,

    /// Maximum number of recent files to examine
    pub max_files: Option<usize>,
}

impl HookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_minutes == Some(0) {
            return Err(ConfigError::InvalidValue(
                "hook.lookback_minutes must be greater than zero".to_string(),
            ));
        }
        if self.max_files == Some(0) {
            return Err(ConfigError::InvalidValue(
                "hook.max_files must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
