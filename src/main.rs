use anyhow::Result;
use dualflags::{cli, setup_logging};

fn main() -> Result<()> {
    // Setup logging first so flag registration and parsing are traced
    setup_logging(cli::debug_requested(std::env::args().skip(1)))?;

    // Parse command line arguments
    let args = cli::parse_args()?;

    // Execute the greeting
    cli::execute_command(&args, &mut std::io::stdout().lock())
}
