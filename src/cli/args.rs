//! Flag declarations for the `greet` binary

use crate::{
    config::ErrorHandling,
    core::{Destination, FlagSet},
    error::Result,
    usage::AnsiColorer,
};
use std::io::IsTerminal;
use std::time::Duration;

/// Greet - say hello to someone, optionally after a delay
#[derive(Debug)]
pub struct Args {
    /// Name to greet
    pub name: Destination<String>,
    /// Age of the person
    pub age: Destination<i32>,
    /// Delay before printing
    pub delay: Destination<Duration>,
    /// Verbose output
    pub verbose: Destination<bool>,
    /// Enable debug logging
    pub debug: Destination<bool>,
}

impl Args {
    /// Declare the greeting flags on `flags`
    pub fn declare(flags: &mut FlagSet) -> Result<Self> {
        Ok(Self {
            name: flags.flag('n', "name", String::from("John Doe"), "Name to greet")?,
            age: flags.flag('a', "age", 25, "Age of the person")?,
            delay: flags.long_flag("delay", Duration::ZERO, "Delay before printing")?,
            verbose: flags.short_flag('v', false, "Verbose output")?,
            debug: flags.long_flag("debug", false, "Enable debug logging")?,
        })
    }

    /// Declare the flags on `flags` and parse `arguments` into them
    pub fn parse_from<I, S>(flags: &mut FlagSet, arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = Self::declare(flags)?;
        flags.parse(arguments)?;
        Ok(args)
    }
}

/// Whether `--debug` is among `arguments`
///
/// Parses a throwaway flag set with all output discarded, so logging can be
/// installed before the reported parse runs. Errors count as not set.
pub fn debug_requested<I, S>(arguments: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut flags = FlagSet::new("", ErrorHandling::Continue);
    flags.set_output(Box::new(std::io::sink()));
    let Ok(args) = Args::declare(&mut flags) else {
        return false;
    };
    // Parse errors are reported by the real parse
    let _ = flags.parse(arguments);
    args.debug.get()
}

/// Parse the process command line, exiting on malformed input
pub fn parse_args() -> Result<Args> {
    let mut flags = FlagSet::command_line();
    if std::io::stderr().is_terminal() {
        flags.use_colorer(AnsiColorer::new());
    }
    Args::parse_from(&mut flags, std::env::args().skip(1))
}
