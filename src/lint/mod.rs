//! lint
//!
//! Brand-compliance linter: finds forbidden words in site sources.
//!
//! # Modules
//!
//! - [`scan`]: Directory walk and whole-word matching
//! - [`report`]: Violation records and report text
//!
//! # Example
//!
//! ```no_run
//! use mirror_tools::lint::{scan_dir, ForbiddenWords};
//! use std::path::Path;
//!
//! let words = ForbiddenWords::new(&["sweat".to_string()])?;
//! let report = scan_dir(Path::new("src"), &words, &["html".to_string()])?;
//! println!("{}", report);
//! # Ok::<(), mirror_tools::lint::LintError>(())
//! ```

pub mod report;
pub mod scan;

use std::path::PathBuf;

use thiserror::Error;

pub use report::{header, LintReport, Violation};
pub use scan::{scan_dir, scan_file, ForbiddenWords};

/// Errors that stop a lint run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Could not read {path}: {err}")]
    Read { path: PathBuf, err: std::io::Error },

    #[error("invalid forbidden word pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no forbidden words configured")]
    NoWords,
}
