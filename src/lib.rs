//! Mirror - project tooling for the Mirror site
//!
//! Mirror bundles the small tools the site project runs from the command
//! line: a Trello board provisioner driven by a JSON spec, a
//! brand-compliance linter for site sources, and a session stop hook.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, maps exit codes)
//! - [`board`] - Board spec model, validation and provisioning
//! - [`api`] - Abstraction for the remote board service (Trello)
//! - [`lint`] - Forbidden-word scanner
//! - [`hook`] - Stop hook logging and incomplete-work scan
//! - [`core`] - Configuration
//! - [`secrets`] - Credential loading and redaction
//! - [`ui`] - User-facing output
//!
//! # Invariants
//!
//! 1. A board spec is fully validated before the first remote call
//! 2. Remote calls are issued one at a time, in dependency order
//! 3. Credential values never appear in output, logs or error messages
//! 4. A dry run sends no network traffic

pub mod api;
pub mod board;
pub mod cli;
pub mod core;
pub mod hook;
pub mod lint;
pub mod secrets;
pub mod ui;
