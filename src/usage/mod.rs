//! Usage output
//!
//! Renders the help listing and the hooks that colorize it.

pub mod colorer;
pub mod render;

pub use colorer::{AnsiColorer, Colorer, DefaultColorer};
pub use render::UsageRenderer;
