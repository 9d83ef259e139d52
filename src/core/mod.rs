//! core
//!
//! Shared infrastructure for the Mirror tools.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading

pub mod config;
