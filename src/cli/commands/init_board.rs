//! init-board command - Create a Trello board from a JSON spec

use std::path::Path;

use anyhow::Result;

use crate::api::create_api;
use crate::board::{load_spec, validate, ProvisionError, Provisioner};
use crate::cli::{Context, EXIT_SUCCESS};
use crate::core::config::Config;
use crate::secrets::Credentials;
use crate::ui::output;

/// Validate the spec and provision the board it describes.
///
/// Any [`ProvisionError`] is returned unchanged so `main` can map it to
/// exit code 2.
pub fn init_board(ctx: &Context, spec_path: &Path, dry_run: bool) -> Result<i32> {
    let spec_path = ctx.resolve(spec_path)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(init_board_impl(ctx, &spec_path, dry_run))?;
    Ok(EXIT_SUCCESS)
}

async fn init_board_impl(ctx: &Context, spec_path: &Path, dry_run: bool) -> Result<(), ProvisionError> {
    let verbosity = ctx.verbosity();

    // Credentials are required even for a dry run.
    let credentials = Credentials::from_env()?;
    let config = Config::load()?;

    let raw = load_spec(spec_path)?;
    let spec = validate(&raw)?;
    output::debug(
        format!(
            "spec ok: {} lists, {} labels, {} cards",
            spec.lists.len(),
            spec.labels.len(),
            spec.cards.len()
        ),
        verbosity,
    );

    let default_org = credentials.default_org.clone();
    let api = create_api(credentials, &config, dry_run)?;

    let report = Provisioner::new(api.as_ref())
        .with_default_org(default_org)
        .with_verbosity(verbosity)
        .run(&spec)
        .await?;

    output::print(report, verbosity);
    Ok(())
}
