//! stop-hook command - Record a session stop and optionally block it

use std::io::{self, Read};

use anyhow::Result;

use crate::cli::{Context, EXIT_SUCCESS};
use crate::core::config::Config;
use crate::hook::{self, HookError, HookOptions, PROJECT_DIR_VAR};

/// Handle one stop event from stdin.
///
/// Always exits 0: a failing hook must never wedge the session. Problems
/// are reported on stderr.
pub fn stop_hook(ctx: &Context, check_incomplete: bool) -> Result<i32> {
    match respond(ctx, check_incomplete) {
        Ok(line) => println!("{}", line),
        Err(err) => match err.downcast_ref::<HookError>() {
            Some(HookError::Payload(parse)) => eprintln!("Error parsing hook input: {}", parse),
            _ => eprintln!("Hook error: {:#}", err),
        },
    }
    Ok(EXIT_SUCCESS)
}

fn respond(ctx: &Context, check_incomplete: bool) -> Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let payload = hook::parse_payload(&input)?;

    let config = Config::load()?;
    let options = HookOptions {
        project_dir: hook::project_dir(std::env::var(PROJECT_DIR_VAR).ok(), &ctx.working_dir()?),
        log_dir: config.hook_log_dir().into(),
        check_incomplete,
        lookback: config.hook_lookback(),
        max_files: config.hook_max_files(),
    };

    let response = hook::handle_stop(payload, &options)?;
    Ok(serde_json::to_string(&response)?)
}
