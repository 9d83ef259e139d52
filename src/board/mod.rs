//! board
//!
//! Board provisioning: spec model, validation and orchestration.
//!
//! # Modules
//!
//! - [`spec`]: Typed spec model and file loading
//! - `validate`: Structural and referential checks
//! - [`provision`]: Ordered creation of board, lists, labels and cards
//! - [`report`]: End-of-run summary
//!
//! # Errors
//!
//! [`SpecError`] covers everything wrong with the input document.
//! [`ProvisionError`] is the umbrella for a failed `init-board` run; the
//! binary maps it to exit code 2.

pub mod provision;
pub mod report;
pub mod spec;
mod validate;

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::core::config::ConfigError;
use crate::secrets::SecretError;

pub use provision::Provisioner;
pub use report::ProvisionReport;
pub use spec::{load_spec, BoardSpec};
pub use validate::validate;

/// Problems with a board spec document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("Failed to read spec {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Spec {path} is not valid JSON: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Spec must contain object: board")]
    MissingBoard,

    #[error("Spec board.name is required")]
    MissingBoardName,

    #[error("Spec must contain non-empty array: lists")]
    MissingLists,

    #[error("Spec lists[{0}] must have name")]
    ListName(usize),

    #[error("Spec lists[].name must be unique (duplicate: {0})")]
    DuplicateList(String),

    #[error("Spec labels must be an array if provided")]
    LabelsNotArray,

    #[error("Spec labels[{0}] must have name and color")]
    LabelFields(usize),

    #[error("Spec cards must be an array if provided")]
    CardsNotArray,

    #[error("Spec cards[{0}] must have name")]
    CardName(usize),

    #[error("Spec cards[{index}] references unknown list: {list}")]
    UnknownList { index: usize, list: String },

    #[error("Spec cards[{index}] references unknown label: {label}")]
    UnknownLabel { index: usize, label: String },

    #[error("Spec {location} must be {expected}")]
    InvalidField {
        location: String,
        expected: &'static str,
    },

    #[error("Card '{card}' references unknown label '{label}'")]
    UnmappedLabel { card: String, label: String },

    #[error("Spec is malformed: {0}")]
    Malformed(String),
}

/// A failed `init-board` run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Credentials(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
