//! hook
//!
//! Session stop hook: records each stop event and optionally asks the
//! session to continue when recent files look unfinished.
//!
//! # Protocol
//!
//! The hook receives a JSON object on stdin and answers with one JSON
//! object on stdout:
//!
//! - `{"continue":true,"suppressOutput":true}` to allow the stop
//! - `{"decision":"block","reason":"..."}` to ask for more work
//!
//! # Modules
//!
//! - [`log`]: Locked append to `completions.jsonl`
//! - [`incomplete`]: Recent-file scan for unfinished-work markers

pub mod incomplete;
pub mod log;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use incomplete::Issue;
use log::CompletionEntry;

/// Environment variable naming the project root.
pub const PROJECT_DIR_VAR: &str = "CLAUDE_PROJECT_DIR";

/// Issues listed in a block reason.
pub const MAX_REPORTED_ISSUES: usize = 5;

const UNKNOWN: &str = "unknown";

/// Errors from handling a stop event.
#[derive(Debug, Error)]
pub enum HookError {
    /// Stdin was not valid JSON.
    #[error("{0}")]
    Payload(serde_json::Error),

    #[error("hook input must be a JSON object")]
    NotAnObject,

    #[error("{path}: {err}")]
    Io { path: PathBuf, err: std::io::Error },

    #[error("failed to encode log entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The hook's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    Allow {
        #[serde(rename = "continue")]
        proceed: bool,
        #[serde(rename = "suppressOutput")]
        suppress_output: bool,
    },
    Block {
        decision: &'static str,
        reason: String,
    },
}

impl HookResponse {
    pub fn allow() -> Self {
        HookResponse::Allow {
            proceed: true,
            suppress_output: true,
        }
    }

    /// Block with the first few `issues` listed.
    pub fn block(issues: &[Issue]) -> Self {
        let listed = issues
            .iter()
            .take(MAX_REPORTED_ISSUES)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        HookResponse::Block {
            decision: "block",
            reason: format!(
                "Found potentially incomplete work:\n{}\n\nPlease address these before completing.",
                listed
            ),
        }
    }
}

/// Settings for one hook invocation.
#[derive(Debug, Clone)]
pub struct HookOptions {
    /// Project root, scanned for incomplete work
    pub project_dir: PathBuf,
    /// Log directory, relative paths resolved against `project_dir`
    pub log_dir: PathBuf,
    pub check_incomplete: bool,
    pub lookback: Duration,
    pub max_files: usize,
}

impl HookOptions {
    fn resolved_log_dir(&self) -> PathBuf {
        self.project_dir.join(&self.log_dir)
    }
}

/// Parse a stop payload. It must be a JSON object.
pub fn parse_payload(input: &str) -> Result<Value, HookError> {
    let payload: Value = serde_json::from_str(input).map_err(HookError::Payload)?;
    if !payload.is_object() {
        return Err(HookError::NotAnObject);
    }
    Ok(payload)
}

fn field_or_unknown(payload: &Value, key: &str) -> Value {
    payload
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(UNKNOWN.to_string()))
}

/// Log the stop event and decide whether to allow it.
pub fn handle_stop(payload: Value, options: &HookOptions) -> Result<HookResponse, HookError> {
    let entry = CompletionEntry::now(
        field_or_unknown(&payload, "session_id"),
        field_or_unknown(&payload, "reason"),
        payload,
    );
    let path = log::append(&options.resolved_log_dir(), &entry)?;
    tracing::debug!(path = %path.display(), "logged stop event");

    if options.check_incomplete {
        let issues = incomplete::scan(&options.project_dir, options.lookback, options.max_files);
        if !issues.is_empty() {
            return Ok(HookResponse::block(&issues));
        }
    }
    Ok(HookResponse::allow())
}

/// Project directory: the value of [`PROJECT_DIR_VAR`] when set, else `cwd`.
pub fn project_dir(env_value: Option<String>, cwd: &Path) -> PathBuf {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &Path, check_incomplete: bool) -> HookOptions {
        HookOptions {
            project_dir: dir.to_path_buf(),
            log_dir: PathBuf::from(".claude/logs"),
            check_incomplete,
            lookback: Duration::from_secs(3600),
            max_files: 20,
        }
    }

    #[test]
    fn responses_serialize_compactly() {
        assert_eq!(
            serde_json::to_string(&HookResponse::allow()).unwrap(),
            r#"{"continue":true,"suppressOutput":true}"#
        );

        let issues = vec![Issue {
            path: PathBuf::from("src/a.rs"),
            indicator: "TODO",
        }];
        let json = serde_json::to_value(HookResponse::block(&issues)).unwrap();
        assert_eq!(json["decision"], "block");
        assert_eq!(
            json["reason"],
            "Found potentially incomplete work:\nsrc/a.rs: contains 'TODO'\n\nPlease address these before completing."
        );
    }

    #[test]
    fn block_lists_at_most_five_issues() {
        let issues: Vec<Issue> = (0..8)
            .map(|i| Issue {
                path: PathBuf::from(format!("f{}", i)),
                indicator: "FIXME",
            })
            .collect();
        match HookResponse::block(&issues) {
            HookResponse::Block { reason, .. } => {
                assert!(reason.contains("f4:"));
                assert!(!reason.contains("f5:"));
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(parse_payload("{oops"), Err(HookError::Payload(_))));
        assert!(matches!(parse_payload("[1]"), Err(HookError::NotAnObject)));
        assert!(parse_payload(r#"{"session_id":"s"}"#).is_ok());
    }

    #[test]
    fn handle_stop_logs_with_defaults() {
        let dir = TempDir::new().unwrap();
        let response = handle_stop(json!({ "extra": 1 }), &options(dir.path(), false)).unwrap();
        assert_eq!(response, HookResponse::allow());

        let log = fs::read_to_string(dir.path().join(".claude/logs/completions.jsonl")).unwrap();
        let entry: Value = serde_json::from_str(log.trim()).unwrap();
        assert_eq!(entry["session_id"], "unknown");
        assert_eq!(entry["stop_reason"], "unknown");
        assert_eq!(entry["data"]["extra"], 1);
    }

    #[test]
    fn handle_stop_blocks_on_incomplete_work() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("draft.md"), "Section coming soon").unwrap();

        let response = handle_stop(
            json!({ "session_id": "s1", "reason": "end_turn" }),
            &options(dir.path(), true),
        )
        .unwrap();
        assert!(matches!(response, HookResponse::Block { .. }));
    }

    #[test]
    fn project_dir_prefers_env() {
        let cwd = Path::new("/work");
        assert_eq!(project_dir(Some("/proj".into()), cwd), PathBuf::from("/proj"));
        assert_eq!(project_dir(Some(String::new()), cwd), PathBuf::from("/work"));
        assert_eq!(project_dir(None, cwd), PathBuf::from("/work"));
    }
}
