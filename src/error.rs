//! Error types for flag coercion and parsing
//!
//! Provides structured error handling with context and proper error chains.

use thiserror::Error;

/// Main error type for flag declaration, coercion and parsing
#[derive(Error, Debug)]
pub enum FlagError {
    /// Text is not a valid literal for the destination's base representation
    #[error("cannot convert {value:?} to {type_name}")]
    Conversion {
        value: String,
        type_name: &'static str,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text parsed as a number but does not fit the destination type
    #[error("casting {value:?} to {type_name}: cannot natively cast to type")]
    TypeCast {
        value: String,
        type_name: &'static str,
    },

    /// An alias was bound twice on the same flag set
    #[error("flag redefined: {name}")]
    Redefined { name: String },

    /// The command line named a flag that was never declared
    #[error("flag provided but not defined: -{name}")]
    UnknownFlag { name: String },

    /// A non-boolean flag was last on the command line without a value
    #[error("flag needs an argument: -{name}")]
    MissingValue { name: String },

    /// Malformed flag token such as `---x` or `-=x`
    #[error("bad flag syntax: {arg}")]
    BadSyntax { arg: String },

    /// A flag's value was rejected during coercion
    #[error("invalid value {value:?} for flag -{name}: {source}")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: Box<FlagError>,
    },

    /// `-h` or `--help` was requested without being declared
    #[error("flag: help requested")]
    Help,

    /// Writing usage or diagnostics failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlagError {
    /// Create a new conversion error
    pub fn conversion<E>(value: impl Into<String>, type_name: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Conversion {
            value: value.into(),
            type_name,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new conversion error without an underlying cause
    pub fn conversion_literal(value: impl Into<String>, type_name: &'static str) -> Self {
        Self::Conversion {
            value: value.into(),
            type_name,
            source: None,
        }
    }

    /// Create a new type cast error
    pub fn type_cast(value: impl Into<String>, type_name: &'static str) -> Self {
        Self::TypeCast {
            value: value.into(),
            type_name,
        }
    }

    /// Create a new redefinition error
    pub fn redefined(name: impl Into<String>) -> Self {
        Self::Redefined { name: name.into() }
    }

    /// Create a new unknown flag error
    pub fn unknown_flag(name: impl Into<String>) -> Self {
        Self::UnknownFlag { name: name.into() }
    }

    /// Create a new missing value error
    pub fn missing_value(name: impl Into<String>) -> Self {
        Self::MissingValue { name: name.into() }
    }

    /// Create a new bad syntax error
    pub fn bad_syntax(arg: impl Into<String>) -> Self {
        Self::BadSyntax { arg: arg.into() }
    }

    /// Wrap a coercion failure with the flag name and offending text
    pub fn invalid_value(name: impl Into<String>, value: impl Into<String>, source: FlagError) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            source: Box::new(source),
        }
    }

    /// True if this is, or wraps, a conversion error
    pub fn is_conversion(&self) -> bool {
        match self {
            Self::Conversion { .. } => true,
            Self::InvalidValue { source, .. } => source.is_conversion(),
            _ => false,
        }
    }

    /// True if this is, or wraps, a type cast error
    pub fn is_type_cast(&self) -> bool {
        match self {
            Self::TypeCast { .. } => true,
            Self::InvalidValue { source, .. } => source.is_type_cast(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FlagError>;
