//! hook::log
//!
//! Append-only completion log (`completions.jsonl`).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;

use super::HookError;

/// Log file name inside the log directory.
pub const COMPLETION_LOG: &str = "completions.jsonl";

/// One line of the completion log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEntry {
    /// Local time, ISO-8601 without offset
    pub timestamp: String,
    pub session_id: Value,
    pub stop_reason: Value,
    /// The full hook payload
    pub data: Value,
}

impl CompletionEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(session_id: Value, stop_reason: Value, data: Value) -> Self {
        Self {
            timestamp: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            session_id,
            stop_reason,
            data,
        }
    }
}

/// Append `entry` as one JSON line to `{log_dir}/completions.jsonl`,
/// creating the directory when needed. Returns the log path.
///
/// The write happens under an exclusive lock on the log file so concurrent
/// sessions never interleave lines.
pub fn append(log_dir: &Path, entry: &CompletionEntry) -> Result<PathBuf, HookError> {
    fs::create_dir_all(log_dir).map_err(|err| HookError::Io {
        path: log_dir.to_path_buf(),
        err,
    })?;

    let path = log_dir.join(COMPLETION_LOG);
    let io_err = |err| HookError::Io {
        path: path.clone(),
        err,
    };

    let mut line = serde_json::to_string(entry)?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)?;
    file.lock_exclusive().map_err(io_err)?;
    file.write_all(line.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    // Lock is released when the file is closed.

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn timestamp_is_iso_without_offset() {
        let entry = CompletionEntry::now(json!("s"), json!("r"), json!({}));
        assert!(chrono::NaiveDateTime::parse_from_str(&entry.timestamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn appends_lines_in_field_order() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join(".claude/logs");

        let first = CompletionEntry::now(json!("s1"), json!("done"), json!({ "session_id": "s1" }));
        let second = CompletionEntry::now(json!("s2"), json!("unknown"), json!({}));
        let path = append(&log_dir, &first).unwrap();
        append(&log_dir, &second).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"timestamp\":"));

        let parsed: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["session_id"], "s1");
        assert_eq!(parsed["stop_reason"], "done");
        assert_eq!(parsed["data"]["session_id"], "s1");

        let parsed: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["session_id"], "s2");
    }
}
