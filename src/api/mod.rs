//! api
//!
//! Abstraction for the remote board service (Trello).
//!
//! # Architecture
//!
//! The [`BoardApi`] trait exposes one polymorphic create operation. The
//! provisioner talks to it only through the helpers in [`resources`], and
//! obtains an implementation from [`create_api`] rather than constructing a
//! client directly.
//!
//! # Modules
//!
//! - `traits`: `BoardApi` trait, request and error types
//! - [`trello`]: reqwest-based Trello client (live and dry-run modes)
//! - [`mock`]: Recording mock for deterministic testing
//! - [`resources`]: Board, list, label, card and checklist helpers
//!
//! # Example
//!
//! ```no_run
//! use mirror_tools::api::{create_api, resources};
//! use mirror_tools::core::config::Config;
//! use mirror_tools::secrets::Credentials;
//!
//! # tokio_test::block_on(async {
//! let api = create_api(Credentials::from_env()?, &Config::load()?, false)?;
//! let list_id = resources::create_list(api.as_ref(), "board-id", "Backlog", "1").await?;
//! println!("created list {}", list_id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

pub mod mock;
pub mod resources;
pub mod trello;
mod traits;

pub use traits::*;

use crate::core::config::Config;
use crate::secrets::Credentials;
use trello::{ClientOptions, Mode, TrelloClient};

/// Create the board API for a run.
///
/// Base URL and timeout come from `config`; `dry_run` selects
/// [`Mode::DryRun`], in which no request leaves the process.
///
/// # Errors
///
/// `ApiError::Init` if the HTTP client cannot be constructed.
pub fn create_api(
    credentials: Credentials,
    config: &Config,
    dry_run: bool,
) -> Result<Box<dyn BoardApi>, ApiError> {
    let options = ClientOptions {
        api_base: config.api_base(),
        timeout: config.request_timeout(),
        mode: if dry_run { Mode::DryRun } else { Mode::Live },
    };
    Ok(Box::new(TrelloClient::new(credentials, options)?))
}
