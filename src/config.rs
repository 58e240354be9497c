//! Configuration for a flag set
//!
//! Centralizes the settings that shape parsing failures and usage output.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSetConfig {
    /// Program name shown in the usage header
    pub program_name: String,
    /// What `parse` does after reporting an error
    pub error_handling: ErrorHandling,
    /// Separator between usage entries
    pub spacing: Spacing,
}

/// Behaviour of `parse` once a parse error has been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorHandling {
    /// Return the error to the caller
    #[default]
    Continue,
    /// Exit the process: status 0 for help, 2 for anything else
    Exit,
}

/// Blank space between consecutive flags in the usage listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spacing {
    #[default]
    Compact,
    SpacedOut,
}

impl Spacing {
    /// Text that terminates each usage entry
    pub fn separator(self) -> &'static str {
        match self {
            Spacing::Compact => "\n",
            Spacing::SpacedOut => "\n\n",
        }
    }
}

impl Default for FlagSetConfig {
    fn default() -> Self {
        Self {
            program_name: program_name_from_env(),
            error_handling: ErrorHandling::default(),
            spacing: Spacing::default(),
        }
    }
}

impl FlagSetConfig {
    /// Create configuration for a named program
    pub fn new(program_name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        Self {
            program_name: program_name.into(),
            error_handling,
            spacing: Spacing::default(),
        }
    }

    /// Configuration matching the process command line: `argv[0]`, exit on error
    pub fn command_line() -> Self {
        Self {
            error_handling: ErrorHandling::Exit,
            ..Self::default()
        }
    }
}

fn program_name_from_env() -> String {
    std::env::args().next().unwrap_or_default()
}
