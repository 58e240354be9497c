//! Text-to-value coercion for the supported flag types
//!
//! The set of types a flag may hold is closed: every integer width, both
//! float widths, [`Duration`], `bool` and [`String`]. Each belongs to exactly
//! one [`FlagKind`], which decides how its text is parsed and displayed.

use crate::error::{FlagError, Result};
use crate::utils::duration::{format_duration, parse_duration};
use std::fmt::Debug;
use std::time::Duration;
use tracing::trace;

/// Family a flag type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Integer,
    Float,
    Bool,
    Duration,
    String,
}

mod sealed {
    pub trait Sealed {}
}

/// A type that can back a flag
///
/// Sealed: implemented for the primitive set only.
pub trait Flaggable: sealed::Sealed + Clone + Default + PartialEq + Debug + 'static {
    /// Family used for coercion and display decisions
    const KIND: FlagKind;

    /// Display name shown in usage output
    const TYPE_NAME: &'static str;

    /// Convert command-line text into a value of this type
    fn coerce(text: &str) -> Result<Self>;

    /// Conventional default formatting
    fn format(&self) -> String;
}

macro_rules! integer_flaggable {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Flaggable for $ty {
            const KIND: FlagKind = FlagKind::Integer;
            const TYPE_NAME: &'static str = stringify!($ty);

            fn coerce(text: &str) -> Result<Self> {
                coerce_integer(text, Self::TYPE_NAME)
            }

            fn format(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

integer_flaggable!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl sealed::Sealed for f64 {}

impl Flaggable for f64 {
    const KIND: FlagKind = FlagKind::Float;
    const TYPE_NAME: &'static str = "f64";

    fn coerce(text: &str) -> Result<Self> {
        parse_float(text, Self::TYPE_NAME)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl sealed::Sealed for f32 {}

impl Flaggable for f32 {
    const KIND: FlagKind = FlagKind::Float;
    const TYPE_NAME: &'static str = "f32";

    fn coerce(text: &str) -> Result<Self> {
        let wide = parse_float(text, Self::TYPE_NAME)?;
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            return Err(FlagError::type_cast(text, Self::TYPE_NAME));
        }
        Ok(narrow)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl sealed::Sealed for bool {}

impl Flaggable for bool {
    const KIND: FlagKind = FlagKind::Bool;
    const TYPE_NAME: &'static str = "bool";

    fn coerce(text: &str) -> Result<Self> {
        match text.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(true),
            "0" | "f" | "false" => Ok(false),
            _ => Err(FlagError::conversion_literal(text, Self::TYPE_NAME)),
        }
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl sealed::Sealed for Duration {}

impl Flaggable for Duration {
    const KIND: FlagKind = FlagKind::Duration;
    const TYPE_NAME: &'static str = "duration";

    fn coerce(text: &str) -> Result<Self> {
        parse_duration(text).map_err(|e| FlagError::conversion(text, Self::TYPE_NAME, e))
    }

    fn format(&self) -> String {
        format_duration(*self)
    }
}

impl sealed::Sealed for String {}

impl Flaggable for String {
    const KIND: FlagKind = FlagKind::String;
    const TYPE_NAME: &'static str = "string";

    fn coerce(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

fn parse_float(text: &str, type_name: &'static str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|e| FlagError::conversion(text, type_name, e))
}

/// Integers are read exactly when the text is an integer literal; otherwise
/// the text goes through `f64` and must land on a whole number in range.
fn coerce_integer<T>(text: &str, type_name: &'static str) -> Result<T>
where
    T: TryFrom<i128>,
{
    if let Ok(wide) = text.parse::<i128>() {
        return T::try_from(wide).map_err(|_| FlagError::type_cast(text, type_name));
    }

    let parsed = parse_float(text, type_name)?;
    trace!("integer flag text {:?} read as float {}", text, parsed);
    if !parsed.is_finite() || parsed.fract() != 0.0 {
        return Err(FlagError::type_cast(text, type_name));
    }
    // Saturates outside i128; every supported width is narrower.
    T::try_from(parsed as i128).map_err(|_| FlagError::type_cast(text, type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("300")]
    #[case("-1")]
    #[case("2.5")]
    #[case("1e10")]
    #[case("inf")]
    fn test_u8_rejects_unrepresentable(#[case] text: &str) {
        let err = u8::coerce(text).unwrap_err();
        assert!(err.is_type_cast(), "{text}: {err}");
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("12px")]
    fn test_u8_rejects_non_numbers(#[case] text: &str) {
        let err = u8::coerce(text).unwrap_err();
        assert!(err.is_conversion(), "{text}: {err}");
    }

    #[test]
    fn test_integer_accepts_float_forms() {
        assert_eq!(u8::coerce("255").unwrap(), 255);
        assert_eq!(i32::coerce("1e3").unwrap(), 1000);
        assert_eq!(i16::coerce("-4.0").unwrap(), -4);
        assert_eq!(i64::coerce("+7").unwrap(), 7);
    }

    #[test]
    fn test_large_integers_stay_exact() {
        assert_eq!(u64::coerce("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(i64::coerce("9007199254740993").unwrap(), 9_007_199_254_740_993);
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(f64::coerce("2.5").unwrap(), 2.5);
        assert_eq!(f32::coerce("0.25").unwrap(), 0.25);
        assert!(f64::coerce("x").unwrap_err().is_conversion());
        assert!(f32::coerce("1e300").unwrap_err().is_type_cast());
    }

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("F", false)]
    #[case("false", false)]
    fn test_bool_literals(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(bool::coerce(text).unwrap(), expected);
    }

    #[test]
    fn test_bool_rejects_other_words() {
        assert!(bool::coerce("yes").unwrap_err().is_conversion());
    }

    #[test]
    fn test_duration_coercion() {
        assert_eq!(Duration::coerce("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(Duration::coerce("500ms").unwrap(), Duration::from_millis(500));
        assert!(Duration::coerce("later").unwrap_err().is_conversion());
        assert!(Duration::coerce("1e10000000s").unwrap_err().is_conversion());
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(String::coerce(" spaced = out ").unwrap(), " spaced = out ");
    }

    #[test]
    fn test_round_trip_of_default_formatting() {
        assert_eq!(i32::coerce(&25i32.format()).unwrap(), 25);
        assert_eq!(f64::coerce(&0.1f64.format()).unwrap(), 0.1);
        assert!(bool::coerce(&true.format()).unwrap());
        for delay in [
            Duration::from_millis(90_500),
            Duration::from_nanos(1_500),
            Duration::from_micros(250),
        ] {
            assert_eq!(Duration::coerce(&delay.format()).unwrap(), delay);
        }
        assert_eq!(String::coerce(&"Ada".to_string().format()).unwrap(), "Ada");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(<u8 as Flaggable>::TYPE_NAME, "u8");
        assert_eq!(<usize as Flaggable>::TYPE_NAME, "usize");
        assert_eq!(<Duration as Flaggable>::TYPE_NAME, "duration");
        assert_eq!(<String as Flaggable>::KIND, FlagKind::String);
    }
}
