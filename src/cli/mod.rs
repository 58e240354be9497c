//! Command-line interface of the `greet` binary
//!
//! Provides flag declarations and command execution.

pub mod args;
pub mod commands;

pub use args::{Args, debug_requested, parse_args};
pub use commands::execute_command;
