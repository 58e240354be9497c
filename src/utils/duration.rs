//! Duration text utilities
//!
//! Parses compound duration literals such as `1h30m` or `500ms`, and renders
//! durations back in the same compact form (`1h30m0s`, `1.5s`, `250µs`).

use std::time::Duration;
use thiserror::Error;

/// Longest literal handed to the parser
pub const MAX_LITERAL_LEN: usize = 64;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Errors from [`parse_duration`]
#[derive(Error, Debug)]
pub enum DurationError {
    #[error("duration literal longer than {} characters", MAX_LITERAL_LEN)]
    TooLong,

    #[error("exponents are not allowed in durations: {0:?}")]
    Exponent(String),

    #[error(transparent)]
    Parse(#[from] parse_duration::parse::Error),
}

/// Parse a compound duration literal
///
/// Accepts `µs` and `μs` as spellings of `us`. Exponent forms such as `1e9s`
/// are rejected before they reach the big-integer arithmetic in the parser.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    if text.chars().count() > MAX_LITERAL_LEN {
        return Err(DurationError::TooLong);
    }
    if has_exponent(text) {
        return Err(DurationError::Exponent(text.to_string()));
    }
    let text = text.replace("µs", "us").replace("μs", "us");
    Ok(parse_duration::parse(&text)?)
}

/// True if an `e` directly follows a number and precedes a digit or sign
fn has_exponent(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).any(|window| {
        let [before, e, after] = window else {
            return false;
        };
        (before.is_ascii_digit() || *before == '.')
            && e.eq_ignore_ascii_case(&'e')
            && (after.is_ascii_digit() || *after == '+' || *after == '-')
    })
}

/// Format a duration using the largest units that fit, e.g. `1h30m0s`
///
/// Durations under one second use a single fractional unit (`ns`, `µs`, `ms`);
/// zero renders as `0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fixed_point(nanos, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fixed_point(nanos, 6));
    }

    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&fixed_point(seconds, 9));
    out.push('s');
    out
}

/// Render `value / 10^digits` with trailing fractional zeros trimmed
fn fixed_point(value: u128, digits: u32) -> String {
    let scale = 10u128.pow(digits);
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_format_sub_second_units() {
        assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_micros(2_250)), "2.25ms");
    }

    #[test]
    fn test_format_compound() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
    }

    #[test]
    fn test_parse_compound_literals() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1h30m0s").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_micro_sign_spellings() {
        assert_eq!(parse_duration("250µs").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration("250μs").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration("1.5µs").unwrap(), Duration::from_nanos(1_500));
    }

    #[test]
    fn test_sub_millisecond_round_trip() {
        for duration in [
            Duration::from_nanos(1_500),
            Duration::from_micros(250),
            Duration::from_nanos(42),
        ] {
            assert_eq!(parse_duration(&format_duration(duration)).unwrap(), duration);
        }
    }

    #[test]
    fn test_parse_rejects_exponents_quickly() {
        let started = std::time::Instant::now();
        for text in ["1e10000000s", "1E9s", "2.5e+3ms", "1.e-4h"] {
            assert!(matches!(
                parse_duration(text),
                Err(DurationError::Exponent(_))
            ));
        }
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_unit_names_with_e_still_parse() {
        assert_eq!(parse_duration("2sec").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("1 week").unwrap(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_parse_rejects_long_literals() {
        let text = format!("{}s", "9".repeat(MAX_LITERAL_LEN));
        assert!(matches!(parse_duration(&text), Err(DurationError::TooLong)));
    }
}
