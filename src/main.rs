//! mirror binary entry point.

use std::process;

use mirror_tools::board::ProvisionError;
use mirror_tools::cli::{self, Cli, EXIT_FAILURE, EXIT_PROVISION};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = match cli::run(cli) {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<ProvisionError>() {
            Some(provision) => {
                eprintln!("ERROR: {}", provision);
                EXIT_PROVISION
            }
            None => {
                eprintln!("error: {:#}", err);
                EXIT_FAILURE
            }
        },
    };

    process::exit(code);
}
