//! Usage listing renderer
//!
//! Renders every registered flag in declaration order, one entry per flag:
//!
//! ```text
//! Usage of greet:
//!   -n, --name string
//!     	Name to greet (default "John Doe")
//!   -v	Verbose output
//! ```

use crate::config::Spacing;
use crate::core::value::Usager;
use crate::usage::colorer::Colorer;
use std::rc::Rc;

/// Entries whose alias column is at most this wide keep usage on the same line
const INLINE_WIDTH: usize = 4;

/// Four spaces before the tab line up under both 4- and 8-column tab stops
const CONTINUATION: &str = "\n    \t";

/// Renders usage text through a [`Colorer`]
pub struct UsageRenderer<'a> {
    colorer: &'a dyn Colorer,
    spacing: Spacing,
}

impl<'a> UsageRenderer<'a> {
    pub fn new(colorer: &'a dyn Colorer, spacing: Spacing) -> Self {
        Self { colorer, spacing }
    }

    /// Render the header followed by one entry per flag
    pub fn render(&self, program_name: &str, flags: &[Rc<dyn Usager>]) -> String {
        let mut out = self.colorer.usage_of(&format!("Usage of {program_name}:"));
        out.push('\n');
        for flag in flags {
            out.push_str(&self.render_entry(flag.as_ref()));
        }
        out
    }

    /// Render a single flag entry, separator included
    pub fn render_entry(&self, flag: &dyn Usager) -> String {
        let colorer = self.colorer;
        let mut line = String::new();
        // Uncolored width of the alias column; escapes never shift alignment.
        let mut width = 0;

        if !flag.short().is_empty() {
            let short = format!("-{}", flag.short());
            line.push_str("  ");
            line.push_str(&colorer.flag(&short));
            width += 2 + short.chars().count();
            if !flag.long().is_empty() {
                line.push_str(&colorer.comma(","));
                width += 1;
            }
        } else {
            line.push(' ');
            width += 1;
        }

        if !flag.long().is_empty() {
            let long = format!("--{}", flag.long());
            line.push(' ');
            line.push_str(&colorer.flag(&long));
            width += 1 + long.chars().count();
        }

        let flag_type = flag.flag_type();
        if !flag_type.is_empty() {
            line.push(' ');
            line.push_str(&colorer.flag_type(flag_type));
            width += 1 + flag_type.chars().count();
        }

        if width <= INLINE_WIDTH {
            line.push('\t');
        } else {
            line.push_str(CONTINUATION);
        }
        line.push_str(&colorer.usage(&flag.usage().replace('\n', CONTINUATION)));

        if !flag.is_zero_value() {
            line.push(' ');
            line.push_str(&colorer.default_value(&default_annotation(flag)));
        }

        line.push_str(self.spacing.separator());
        line
    }
}

/// `(default "text")` for strings, `(default value)` for everything else
fn default_annotation(flag: &dyn Usager) -> String {
    match flag.default_value().downcast_ref::<String>() {
        Some(text) => format!("(default {text:?})"),
        None => format!("(default {})", flag.default_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coerce::Flaggable;
    use crate::core::value::{Destination, FlagValue};
    use crate::usage::colorer::DefaultColorer;
    use std::time::Duration;

    fn flag<T: Flaggable>(short: &str, long: &str, default: T, usage: &str) -> Rc<dyn Usager> {
        let destination = Destination::new(default.clone());
        Rc::new(FlagValue::new(short, long, default, usage, destination))
    }

    fn entry(flag: Rc<dyn Usager>) -> String {
        UsageRenderer::new(&DefaultColorer, Spacing::Compact).render_entry(flag.as_ref())
    }

    /// Brackets every token so its position is visible in the output
    struct Marker;

    impl Colorer for Marker {
        fn usage_of(&self, text: &str) -> String {
            format!("<H>{text}</H>")
        }
        fn flag(&self, text: &str) -> String {
            format!("<F>{text}</F>")
        }
        fn comma(&self, text: &str) -> String {
            format!("<C>{text}</C>")
        }
        fn usage(&self, text: &str) -> String {
            format!("<U>{text}</U>")
        }
        fn flag_type(&self, text: &str) -> String {
            format!("<T>{text}</T>")
        }
        fn default_value(&self, text: &str) -> String {
            format!("<D>{text}</D>")
        }
    }

    #[test]
    fn test_short_bool_stays_inline() {
        assert_eq!(entry(flag("v", "", false, "Verbose output")), "  -v\tVerbose output\n");
    }

    #[test]
    fn test_wide_entries_wrap() {
        assert_eq!(
            entry(flag("n", "name", String::from("John Doe"), "Name to greet")),
            "  -n, --name string\n    \tName to greet (default \"John Doe\")\n"
        );
        assert_eq!(
            entry(flag("", "delay", Duration::ZERO, "Delay before printing")),
            "  --delay duration\n    \tDelay before printing\n"
        );
    }

    #[test]
    fn test_short_typed_flag_wraps() {
        assert_eq!(
            entry(flag("a", "", 25i32, "Age of the person")),
            "  -a i32\n    \tAge of the person (default 25)\n"
        );
    }

    #[test]
    fn test_long_bool_without_short() {
        assert_eq!(entry(flag("", "q", false, "Quiet")), "  --q\n    \tQuiet\n");
    }

    #[test]
    fn test_multiline_usage_is_indented() {
        assert_eq!(
            entry(flag("x", "", false, "first\nsecond")),
            "  -x\tfirst\n    \tsecond\n"
        );
    }

    #[test]
    fn test_non_string_defaults_are_unquoted() {
        assert_eq!(
            entry(flag("", "delay", Duration::from_secs(90), "Delay")),
            "  --delay duration\n    \tDelay (default 1m30s)\n"
        );
        assert_eq!(entry(flag("f", "", true, "Force")), "  -f\tForce (default true)\n");
    }

    #[test]
    fn test_spaced_out_separator() {
        let renderer = UsageRenderer::new(&DefaultColorer, Spacing::SpacedOut);
        let text = renderer.render_entry(flag("v", "", false, "Verbose").as_ref());
        assert_eq!(text, "  -v\tVerbose\n\n");
    }

    #[test]
    fn test_header_and_order() {
        let flags = vec![
            flag("v", "", false, "Verbose"),
            flag("", "delay", Duration::ZERO, "Delay"),
        ];
        let text = UsageRenderer::new(&DefaultColorer, Spacing::Compact).render("prog", &flags);
        assert_eq!(
            text,
            "Usage of prog:\n  -v\tVerbose\n  --delay duration\n    \tDelay\n"
        );
    }

    #[test]
    fn test_marker_colorer_touches_every_token() {
        let flags = vec![
            flag("n", "name", String::from("John Doe"), "Name to greet"),
            flag("v", "", false, "Verbose"),
        ];
        let text = UsageRenderer::new(&Marker, Spacing::Compact).render("prog", &flags);
        assert_eq!(
            text,
            "<H>Usage of prog:</H>\n\
             \x20 <F>-n</F><C>,</C> <F>--name</F> <T>string</T>\n    \t<U>Name to greet</U> <D>(default \"John Doe\")</D>\n\
             \x20 <F>-v</F>\t<U>Verbose</U>\n"
        );
    }
}
