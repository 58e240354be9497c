//! Flag values and their shared destinations
//!
//! A [`FlagValue`] is the one object both aliases of a flag point at. It
//! writes parsed values into a [`Destination`] the caller also holds, and
//! describes itself to the usage renderer through [`Usager`].

use crate::core::coerce::{FlagKind, Flaggable};
use crate::error::Result;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Caller-visible storage a flag writes into
///
/// Cloning yields another handle to the same storage.
pub struct Destination<T>(Rc<RefCell<T>>);

impl<T> Destination<T> {
    /// Create storage holding an initial value
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    /// Overwrite the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }

    /// Borrow the value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    /// True if both handles refer to the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Destination<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Destination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Destination").field(&self.0.borrow()).finish()
    }
}

impl<T: Default> Default for Destination<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Settable-from-text contract the parser works against
pub trait Value {
    /// Coerce `text` and store it in the destination
    fn set(&self, text: &str) -> Result<()>;

    /// Current destination value as text
    fn current(&self) -> String;

    /// Whether the bare `-x` form is accepted
    fn is_bool_flag(&self) -> bool {
        false
    }
}

/// Everything the usage renderer needs to describe a flag
pub trait Usager {
    /// Single-character alias, or empty
    fn short(&self) -> &str;
    /// Word alias, or empty
    fn long(&self) -> &str;
    fn usage(&self) -> &str;
    /// Default supplied at declaration, for display only
    fn default_value(&self) -> &dyn Any;
    /// Default formatted the same way as [`Value::current`]
    fn default_text(&self) -> String;
    fn is_zero_value(&self) -> bool;
    /// Type name for usage output; empty for booleans
    fn flag_type(&self) -> &'static str;
    fn kind(&self) -> FlagKind;
}

/// A flag of one [`Flaggable`] type
#[derive(Debug)]
pub struct FlagValue<T: Flaggable> {
    default: T,
    destination: Option<Destination<T>>,
    short: String,
    long: String,
    usage: String,
}

impl<T: Flaggable> FlagValue<T> {
    /// Create a flag value bound to `destination`
    ///
    /// The destination is not written; it keeps whatever it already holds.
    pub fn new(
        short: impl Into<String>,
        long: impl Into<String>,
        default: T,
        usage: impl Into<String>,
        destination: Destination<T>,
    ) -> Self {
        Self {
            default,
            destination: Some(destination),
            short: short.into(),
            long: long.into(),
            usage: usage.into(),
        }
    }

    /// Destination this flag writes into, if bound
    pub fn destination(&self) -> Option<&Destination<T>> {
        self.destination.as_ref()
    }
}

impl<T: Flaggable> Default for FlagValue<T> {
    /// An unbound value: sets are coerced and then dropped
    fn default() -> Self {
        Self {
            default: T::default(),
            destination: None,
            short: String::new(),
            long: String::new(),
            usage: String::new(),
        }
    }
}

impl<T: Flaggable> Value for FlagValue<T> {
    fn set(&self, text: &str) -> Result<()> {
        let value = T::coerce(text)?;
        trace!("flag {}/{} set to {:?}", self.short, self.long, value);
        if let Some(destination) = &self.destination {
            destination.replace(value);
        }
        Ok(())
    }

    fn current(&self) -> String {
        match &self.destination {
            Some(destination) => destination.with(|value| value.format()),
            None => T::default().format(),
        }
    }

    fn is_bool_flag(&self) -> bool {
        T::KIND == FlagKind::Bool
    }
}

impl<T: Flaggable> Usager for FlagValue<T> {
    fn short(&self) -> &str {
        &self.short
    }

    fn long(&self) -> &str {
        &self.long
    }

    fn usage(&self) -> &str {
        &self.usage
    }

    fn default_value(&self) -> &dyn Any {
        &self.default
    }

    fn default_text(&self) -> String {
        self.default.format()
    }

    fn is_zero_value(&self) -> bool {
        self.default == T::default()
    }

    fn flag_type(&self) -> &'static str {
        match T::KIND {
            FlagKind::Bool => "",
            _ => T::TYPE_NAME,
        }
    }

    fn kind(&self) -> FlagKind {
        T::KIND
    }
}
