//! Command implementation for the `greet` binary

use crate::{cli::Args, utils::format_duration};
use anyhow::Context;
use std::io::Write;
use tracing::{debug, instrument};

/// Wait for the configured delay, then greet
#[instrument(skip(args, out))]
pub fn execute_command(args: &Args, out: &mut dyn Write) -> anyhow::Result<()> {
    let delay = args.delay.get();
    if !delay.is_zero() {
        if args.verbose.get() {
            writeln!(out, "Waiting for {}", format_duration(delay))
                .context("Failed to write progress")?;
        }
        debug!("Sleeping for {:?}", delay);
        std::thread::sleep(delay);
    }

    writeln!(
        out,
        "Hello, {}! You are {} years old.",
        args.name.get(),
        args.age.get()
    )
    .context("Failed to write greeting")?;
    Ok(())
}
