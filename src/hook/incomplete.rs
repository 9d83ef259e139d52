//! hook::incomplete
//!
//! Heuristic scan of recently modified files for signs of unfinished work.
//!
//! The scan is advisory: unreadable directories and files are skipped, and
//! nothing here returns an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", ".venv", "venv"];

/// Phrases that suggest unfinished work, checked in this order.
pub const INCOMPLETE_INDICATORS: &[&str] = &[
    "TODO",
    "FIXME",
    "not implemented",
    "placeholder",
    "will implement",
    "need to add",
    "coming soon",
    "later",
    "skip for now",
];

/// A file that contains an indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: PathBuf,
    pub indicator: &'static str,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: contains '{}'", self.path.display(), self.indicator)
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Files under `root` modified within `lookback`, in walk order.
pub fn recent_files(root: &Path, lookback: Duration) -> Vec<PathBuf> {
    let cutoff = SystemTime::now()
        .checked_sub(lookback)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .is_some_and(|modified| modified >= cutoff)
        })
        .map(DirEntry::into_path)
        .collect()
}

/// First indicator found in `content`, compared case-insensitively.
pub fn first_indicator(content: &str) -> Option<&'static str> {
    let lowered = content.to_lowercase();
    INCOMPLETE_INDICATORS
        .iter()
        .copied()
        .find(|indicator| lowered.contains(&indicator.to_lowercase()))
}

/// Check at most `max_files` recent files, one issue per file.
pub fn scan(root: &Path, lookback: Duration, max_files: usize) -> Vec<Issue> {
    recent_files(root, lookback)
        .into_iter()
        .take(max_files)
        .filter_map(|path| {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    debug!(path = %path.display(), "skipping: {}", err);
                    return None;
                }
            };
            let content = String::from_utf8_lossy(&bytes);
            first_indicator(&content).map(|indicator| Issue { path, indicator })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn indicators_match_case_insensitively_in_order() {
        assert_eq!(first_indicator("// todo: wire this up"), Some("TODO"));
        assert_eq!(first_indicator("fixme and todo"), Some("TODO"));
        assert_eq!(first_indicator("Coming Soon!"), Some("coming soon"));
        assert_eq!(first_indicator("all done"), None);
    }

    #[test]
    fn later_matches_inside_words() {
        assert_eq!(first_indicator("see you Later"), Some("later"));
    }

    #[test]
    fn scan_reports_one_issue_per_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rs"), "// TODO\n// FIXME\n").unwrap();
        fs::write(dir.path().join("b.rs"), "fn main() {}\n").unwrap();

        let issues = scan(dir.path(), HOUR, 20);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].indicator, "TODO");
        assert!(issues[0].to_string().ends_with("a.rs: contains 'TODO'"));
    }

    #[test]
    fn excluded_dirs_are_skipped() {
        let dir = TempDir::new().unwrap();
        for excluded in EXCLUDED_DIRS {
            let sub = dir.path().join(excluded);
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join("x.js"), "placeholder").unwrap();
        }
        assert!(scan(dir.path(), HOUR, 20).is_empty());
    }

    #[test]
    fn max_files_limits_examined_files() {
        let dir = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("f{}.txt", i)), "TODO").unwrap();
        }
        assert_eq!(scan(dir.path(), HOUR, 3).len(), 3);
    }

    #[test]
    fn files_outside_lookback_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old.txt");
        fs::write(&path, "TODO").unwrap();
        let old = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(old)
            .unwrap();

        assert!(recent_files(dir.path(), HOUR).is_empty());
    }
}
