//! # dualflags
//!
//! Command-line flags declared with a short and a long alias bound to one
//! destination, and a usage listing that can be colorized token by token.
//!
//! ## Features
//!
//! - One value per flag, reachable as `-n` and `--name`
//! - Typed destinations for integers, floats, booleans, durations and strings
//! - Usage output aligned for 4- and 8-column tab stops
//! - Pluggable [`Colorer`] hooks, with an ANSI implementation included
//!
//! ## Example
//!
//! ```no_run
//! use dualflags::FlagSet;
//!
//! let mut flags = FlagSet::command_line();
//! let name = flags.flag('n', "name", String::from("John Doe"), "Name to greet")?;
//! let age = flags.flag('a', "age", 25i32, "Age of the person")?;
//! flags.parse_env_args()?;
//! println!("Hello, {}! You are {} years old.", name.get(), age.get());
//! # Ok::<(), dualflags::FlagError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod usage;
pub mod utils;

pub use crate::config::{ErrorHandling, FlagSetConfig, Spacing};
pub use crate::core::{Destination, FlagKind, FlagSet, FlagValue, Flaggable, Usager, Value};
pub use crate::error::{FlagError, Result};
pub use crate::usage::{AnsiColorer, Colorer, DefaultColorer, UsageRenderer};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
