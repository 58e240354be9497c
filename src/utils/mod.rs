//! Utility modules for common functionality
//!
//! Provides duration text handling shared by coercion and rendering.

pub mod duration;

pub use duration::{DurationError, format_duration, parse_duration};
