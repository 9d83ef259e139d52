//! lint::scan
//!
//! Directory walk and per-file matching.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::report::{LintReport, Violation};
use super::LintError;

/// Case-insensitive whole-word matcher for a set of forbidden words.
#[derive(Debug, Clone)]
pub struct ForbiddenWords {
    words: Vec<String>,
    pattern: Regex,
}

impl ForbiddenWords {
    /// Build a matcher. Words are matched literally.
    ///
    /// # Errors
    ///
    /// `LintError::NoWords` for an empty list.
    pub fn new(words: &[String]) -> Result<Self, LintError> {
        if words.is_empty() {
            return Err(LintError::NoWords);
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b({})\b", alternation))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            words: words.to_vec(),
            pattern,
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Every match in `line`, as the text found.
    pub fn find_in<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.find_iter(line).map(|m| m.as_str())
    }
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Scan one file. Lines are numbered from 1 and reported trimmed.
///
/// # Errors
///
/// `LintError::Read` if the file cannot be read.
pub fn scan_file(path: &Path, words: &ForbiddenWords) -> Result<Vec<Violation>, LintError> {
    let bytes = fs::read(path).map_err(|err| LintError::Read {
        path: path.to_path_buf(),
        err,
    })?;
    let text = decode(bytes);

    let mut violations = Vec::new();
    for (index, line) in text.lines().enumerate() {
        for word in words.find_in(line) {
            violations.push(Violation {
                line: index + 1,
                text: line.trim().to_string(),
                word: word.to_string(),
            });
        }
    }
    Ok(violations)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Scan every file under `root` whose extension is in `extensions`
/// (given without the leading dot).
///
/// A missing root is reported on stderr and produces an empty report.
///
/// # Errors
///
/// The first unreadable file aborts the scan.
pub fn scan_dir(
    root: &Path,
    words: &ForbiddenWords,
    extensions: &[String],
) -> Result<LintReport, LintError> {
    let mut files = BTreeMap::new();

    if !root.exists() {
        eprintln!("Error: Directory {} does not exist", root.display());
        return Ok(LintReport { files });
    }

    let entries = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                None
            }
        });

    for entry in entries {
        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extensions) {
            continue;
        }

        debug!(path = %path.display(), "scanning");
        let violations = scan_file(path, words)?;
        if !violations.is_empty() {
            files.insert(path.display().to_string(), violations);
        }
    }

    Ok(LintReport { files })
}
