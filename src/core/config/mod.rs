//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! All tools share one optional TOML file. Values resolve in this order
//! (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! Secrets are never read from the config file; see [`crate::secrets`].
//!
//! # Example
//!
//! ```no_run
//! use mirror_tools::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API base: {}", config.api_base());
//! println!("Lint root: {}", config.lint_root());
//! ```

pub mod schema;

pub use schema::{FileConfig, HookConfig, LintConfig, TrelloConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MIRROR_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults when no file was found)
    pub file: FileConfig,
    /// Path the configuration was read from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate(|name| std::env::var(name).ok(), dirs::home_dir()) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        // 1. Check $MIRROR_CONFIG
        if let Some(path) = env(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/mirror/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("mirror/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.mirror/config.toml
        let path = home?.join(".mirror/config.toml");
        path.exists().then_some(path)
    }

    /// Path the configuration was read from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Trello API base URL, without a trailing slash.
    pub fn api_base(&self) -> String {
        self.file
            .trello
            .as_ref()
            .and_then(|t| t.api_base.as_deref())
            .unwrap_or(schema::DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string()
    }

    /// Per-request timeout. `None` leaves the HTTP client default.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.file
            .trello
            .as_ref()
            .and_then(|t| t.timeout_secs)
            .map(Duration::from_secs)
    }

    /// Directory the linter scans. Defaults to `src`.
    pub fn lint_root(&self) -> &str {
        self.file
            .lint
            .as_ref()
            .and_then(|l| l.root.as_deref())
            .unwrap_or("src")
    }

    /// Words the linter rejects.
    pub fn lint_words(&self) -> Vec<String> {
        self.file
            .lint
            .as_ref()
            .and_then(|l| l.words.clone())
            .unwrap_or_else(|| to_owned(schema::DEFAULT_FORBIDDEN_WORDS))
    }

    /// Extensions the linter scans, without leading dots.
    pub fn lint_extensions(&self) -> Vec<String> {
        self.file
            .lint
            .as_ref()
            .and_then(|l| l.extensions.clone())
            .unwrap_or_else(|| to_owned(schema::DEFAULT_SCAN_EXTENSIONS))
    }

    /// Hook log directory relative to the project directory.
    pub fn hook_log_dir(&self) -> &str {
        self.file
            .hook
            .as_ref()
            .and_then(|h| h.log_dir.as_deref())
            .unwrap_or(".claude/logs")
    }

    /// Window within which a modification counts as recent.
    pub fn hook_lookback(&self) -> Duration {
        let minutes = self
            .file
            .hook
            .as_ref()
            .and_then(|h| h.lookback_minutes)
            .unwrap_or(schema::DEFAULT_LOOKBACK_MINUTES);
        Duration::from_secs(minutes * 60)
    }

    /// Maximum number of recent files the hook examines.
    pub fn hook_max_files(&self) -> usize {
        self.file
            .hook
            .as_ref()
            .and_then(|h| h.max_files)
            .unwrap_or(schema::DEFAULT_MAX_FILES)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, String> = pairs.into_iter().collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.api_base(), "https://api.trello.com/1");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.lint_root(), "src");
        assert_eq!(
            config.lint_words(),
            vec!["sweat", "sweaty", "perspire", "perspiration"]
        );
        assert_eq!(config.lint_extensions(), vec!["html", "css", "js", "md"]);
        assert_eq!(config.hook_log_dir(), ".claude/logs");
        assert_eq!(config.hook_lookback(), Duration::from_secs(3600));
        assert_eq!(config.hook_max_files(), 20);
        assert!(config.path().is_none());
    }

    #[test]
    fn load_file_applies_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[trello]\napi_base = \"http://127.0.0.1:8080/1/\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.api_base(), "http://127.0.0.1:8080/1");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn load_file_reports_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[trello\n").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn load_file_runs_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[hook]\nmax_files = 0\n").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn locate_prefers_explicit_env_var() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "").unwrap();
        let xdg = dir.path().join("xdg");
        fs::create_dir_all(xdg.join("mirror")).unwrap();
        fs::write(xdg.join("mirror/config.toml"), "").unwrap();

        let found = Config::locate(
            lookup(vec![
                ("MIRROR_CONFIG", explicit.display().to_string()),
                ("XDG_CONFIG_HOME", xdg.display().to_string()),
            ]),
            None,
        );
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn locate_falls_back_to_home() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".mirror")).unwrap();
        fs::write(dir.path().join(".mirror/config.toml"), "").unwrap();

        let found = Config::locate(lookup(vec![]), Some(dir.path().to_path_buf()));
        assert_eq!(found, Some(dir.path().join(".mirror/config.toml")));
    }

    #[test]
    fn locate_returns_none_when_nothing_exists() {
        let dir = TempDir::new().unwrap();
        let found = Config::locate(
            lookup(vec![(
                "MIRROR_CONFIG",
                dir.path().join("missing.toml").display().to_string(),
            )]),
            Some(dir.path().to_path_buf()),
        );
        assert_eq!(found, None);
    }
}
