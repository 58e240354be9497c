//! Colorization hooks for usage output
//!
//! Each visually distinct token of the usage listing passes through one
//! [`Colorer`] hook. Every hook defaults to returning its input unchanged, so
//! a custom colorer only overrides the tokens it cares about.

use std::io::Write;
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Decoration strategy for usage tokens
pub trait Colorer {
    /// The `Usage of <program>:` header
    fn usage_of(&self, text: &str) -> String {
        text.to_string()
    }

    /// A flag alias such as `-v` or `--verbose`
    fn flag(&self, text: &str) -> String {
        text.to_string()
    }

    /// The comma between a short and a long alias
    fn comma(&self, text: &str) -> String {
        text.to_string()
    }

    /// A flag's usage text
    fn usage(&self, text: &str) -> String {
        text.to_string()
    }

    /// The type annotation; never called for booleans
    fn flag_type(&self, text: &str) -> String {
        text.to_string()
    }

    /// The whole `(default ...)` annotation, parentheses included
    fn default_value(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Colorer that leaves every token untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColorer;

impl Colorer for DefaultColorer {}

/// Colorer emitting ANSI escape sequences, one [`ColorSpec`] per token
#[derive(Debug, Clone)]
pub struct AnsiColorer {
    usage_of: ColorSpec,
    flag: ColorSpec,
    comma: ColorSpec,
    usage: ColorSpec,
    flag_type: ColorSpec,
    default_value: ColorSpec,
}

impl AnsiColorer {
    /// Create a colorer with the standard palette
    ///
    /// Bold header, bold cyan aliases, green types and yellow defaults.
    pub fn new() -> Self {
        let mut usage_of = ColorSpec::new();
        usage_of.set_bold(true);
        let mut flag = ColorSpec::new();
        flag.set_fg(Some(Color::Cyan)).set_bold(true);
        let mut flag_type = ColorSpec::new();
        flag_type.set_fg(Some(Color::Green));
        let mut default_value = ColorSpec::new();
        default_value.set_fg(Some(Color::Yellow));

        Self {
            usage_of,
            flag,
            comma: ColorSpec::new(),
            usage: ColorSpec::new(),
            flag_type,
            default_value,
        }
    }

    pub fn with_usage_of(mut self, spec: ColorSpec) -> Self {
        self.usage_of = spec;
        self
    }

    pub fn with_flag(mut self, spec: ColorSpec) -> Self {
        self.flag = spec;
        self
    }

    pub fn with_comma(mut self, spec: ColorSpec) -> Self {
        self.comma = spec;
        self
    }

    pub fn with_usage(mut self, spec: ColorSpec) -> Self {
        self.usage = spec;
        self
    }

    pub fn with_flag_type(mut self, spec: ColorSpec) -> Self {
        self.flag_type = spec;
        self
    }

    pub fn with_default_value(mut self, spec: ColorSpec) -> Self {
        self.default_value = spec;
        self
    }
}

impl Default for AnsiColorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorer for AnsiColorer {
    fn usage_of(&self, text: &str) -> String {
        paint(&self.usage_of, text)
    }

    fn flag(&self, text: &str) -> String {
        paint(&self.flag, text)
    }

    fn comma(&self, text: &str) -> String {
        paint(&self.comma, text)
    }

    fn usage(&self, text: &str) -> String {
        paint(&self.usage, text)
    }

    fn flag_type(&self, text: &str) -> String {
        paint(&self.flag_type, text)
    }

    fn default_value(&self, text: &str) -> String {
        paint(&self.default_value, text)
    }
}

/// Wrap `text` in the escapes for `spec`; a plain spec adds nothing
fn paint(spec: &ColorSpec, text: &str) -> String {
    if spec.is_none() {
        return text.to_string();
    }
    match write_painted(spec, text) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => text.to_string(),
    }
}

fn write_painted(spec: &ColorSpec, text: &str) -> std::io::Result<Vec<u8>> {
    let mut out = Ansi::new(Vec::new());
    out.set_color(spec)?;
    out.write_all(text.as_bytes())?;
    out.reset()?;
    Ok(out.into_inner())
}
