//! Core functionality for declaring and parsing flags
//!
//! Contains value coercion, the shared flag values both aliases point at,
//! and the flag set that registers and parses them.

pub mod coerce;
pub mod flagset;
pub mod value;

pub use coerce::{FlagKind, Flaggable};
pub use flagset::FlagSet;
pub use value::{Destination, FlagValue, Usager, Value};
