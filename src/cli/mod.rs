//! cli
//!
//! Command-line interface layer for mirror.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Map outcomes to process exit codes
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers load configuration and credentials, call
//! into the library modules, and format results for the terminal.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::ui::output::Verbosity;

/// Successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Lint violations, unreadable files and other general failures.
pub const EXIT_FAILURE: i32 = 1;
/// Board provisioning failed (credentials, config, spec, or API).
pub const EXIT_PROVISION: i32 = 2;

/// Global settings shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Working directory: `--cwd` if given, else the process directory.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("failed to determine working directory"),
        }
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &std::path::Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.working_dir()?.join(path))
        }
    }
}

/// Run a parsed command line and return the exit code.
///
/// This is the entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<i32> {
    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn resolve_uses_cwd_flag() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/site")),
            debug: false,
            quiet: false,
        };
        assert_eq!(ctx.resolve(Path::new("src")).unwrap(), PathBuf::from("/site/src"));
        assert_eq!(ctx.resolve(Path::new("/abs")).unwrap(), PathBuf::from("/abs"));
    }
}
