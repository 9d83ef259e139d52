//! lint command - Scan site sources for forbidden brand words

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::{Context, EXIT_FAILURE, EXIT_SUCCESS};
use crate::core::config::Config;
use crate::lint::{header, scan_dir, ForbiddenWords};
use crate::ui::output;

/// Scan `root` (or the configured root) and print the compliance report.
///
/// Returns exit code 1 when any forbidden word is found.
pub fn lint(ctx: &Context, root: Option<&Path>) -> Result<i32> {
    let verbosity = ctx.verbosity();
    let config = Config::load()?;

    let root = match root {
        Some(root) => ctx.resolve(root)?,
        None => ctx.resolve(Path::new(config.lint_root()))?,
    };
    let words = ForbiddenWords::new(&config.lint_words())?;

    output::print(header(&root, words.words()), verbosity);

    let report = scan_dir(&root, &words, &config.lint_extensions())
        .with_context(|| format!("lint of {} aborted", root.display()))?;
    output::print(&report, verbosity);

    Ok(if report.is_clean() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}
