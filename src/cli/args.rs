//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mirror - project tooling for the Mirror site
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if mirror was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a Trello board from a JSON spec
    #[command(
        name = "init-board",
        long_about = "Create a Trello board, its lists, labels, cards and checklists \
            from a JSON spec.\n\n\
            The spec is validated before any request is made. Credentials come from \
            TRELLO_KEY and TRELLO_TOKEN; TRELLO_ORG_ID sets a default organization. \
            Creation stops at the first failure and nothing is rolled back.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check a spec without touching Trello
    mirror init-board board.json --dry-run

    # Create the board
    TRELLO_KEY=... TRELLO_TOKEN=... mirror init-board board.json

    # Populate an existing board: set \"id\" inside the spec's board object

EXIT CODES:
    0  board provisioned (or dry run completed)
    2  missing credentials, invalid spec, or Trello/network error"
    )]
    InitBoard {
        /// Path to the board spec JSON
        spec_path: PathBuf,

        /// Validate and simulate without calling Trello
        #[arg(long)]
        dry_run: bool,
    },

    /// Scan site sources for forbidden brand words
    #[command(
        name = "lint",
        after_help = "\
WORKFLOW EXAMPLES:
    # Scan ./src (or [lint].root from config)
    mirror lint

    # Scan another directory
    mirror lint --root site/public"
    )]
    Lint {
        /// Directory to scan
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Handle a session stop event (reads JSON from stdin)
    #[command(name = "stop-hook")]
    StopHook {
        /// Block the stop when recently modified files look unfinished
        #[arg(long)]
        check_incomplete: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    mirror completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    mirror completion zsh >> ~/.zshrc

    # Fish
    mirror completion fish > ~/.config/fish/completions/mirror.fish

    # PowerShell
    mirror completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_init_board() {
        let cli = Cli::try_parse_from(["mirror", "init-board", "spec.json", "--dry-run"]).unwrap();
        match cli.command {
            Command::InitBoard { spec_path, dry_run } => {
                assert_eq!(spec_path, PathBuf::from("spec.json"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mirror", "lint", "--root", "site", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Lint { root: Some(_) }));
    }

    #[test]
    fn init_board_requires_spec_path() {
        assert!(Cli::try_parse_from(["mirror", "init-board"]).is_err());
    }
}
