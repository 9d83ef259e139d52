//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler returns the process exit code on success. Errors propagate
//! as `anyhow::Error` and are mapped to exit codes by `main`.
//!
//! # Async Commands
//!
//! `init-board` talks to Trello over the network. Its handler builds a
//! tokio runtime and blocks on the async implementation.

mod completion;
mod init_board;
mod lint;
mod stop_hook;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use init_board::init_board;
pub use lint::lint;
pub use stop_hook::stop_hook;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::InitBoard { spec_path, dry_run } => init_board(ctx, &spec_path, dry_run),
        Command::Lint { root } => lint(ctx, root.as_deref()),
        Command::StopHook { check_incomplete } => stop_hook(ctx, check_incomplete),
        Command::Completion { shell } => completion(shell),
    }
}
