//! Setting descriptor types
//! Type definitions for declarative setting configuration

use crate::error::{ErrorSeverity, ErrorType, NavError};

/// Typed value after parsing and validation
/// Setters receive this, never raw strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Integer(usize),
    /// Canonical variant name
    Enum(String),
}

/// Setting type definition for parsing and validation
#[derive(Debug, Clone)]
pub enum SettingType {
    /// true/false, on/off, yes/no, 1/0
    Boolean,
    /// Integer with optional inclusive bounds
    Integer {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// One of a fixed list of names
    Enum {
        variants: &'static [&'static str],
    },
}

/// Structured error for setting operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// Failed to parse string value
    ParseError(String),
    /// Value failed validation (out of range, etc.)
    ValidationError(String),
    /// Unknown option name
    UnknownOption(String),
    /// Prefix matches more than one option
    AmbiguousOption { prefix: String, matches: Vec<String> },
}

impl std::fmt::Display for SettingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            SettingError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            SettingError::UnknownOption(name) => write!(f, "Unknown option: {name}"),
            SettingError::AmbiguousOption { prefix, matches } => {
                write!(f, "Ambiguous option '{prefix}': matches {}", matches.join(", "))
            }
        }
    }
}

impl std::error::Error for SettingError {}

impl From<SettingError> for NavError {
    fn from(err: SettingError) -> Self {
        let (kind, code) = match &err {
            SettingError::ParseError(_) => (ErrorType::Parse, "SETTING_PARSE_ERROR"),
            SettingError::ValidationError(_) => (ErrorType::Settings, "SETTING_VALIDATION_ERROR"),
            SettingError::UnknownOption(_) => (ErrorType::Settings, "UNKNOWN_SETTING"),
            SettingError::AmbiguousOption { .. } => (ErrorType::Settings, "AMBIGUOUS_SETTING"),
        };
        NavError {
            severity: ErrorSeverity::Error,
            kind,
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

/// Setter function signature
///
/// Function pointers (not trait objects) for static dispatch.
/// Receives parsed and validated `SettingValue`, never raw strings.
pub type SettingSetter<T> = fn(&mut T, SettingValue) -> Result<(), SettingError>;

/// Setting descriptor
///
/// Name, aliases, type and setter; the setter handles the mutation.
#[derive(Debug, Clone)]
pub struct SettingDescriptor<T> {
    /// Canonical setting name (e.g., "linewidth")
    pub name: &'static str,
    /// Short aliases (e.g., &["lw"])
    pub aliases: &'static [&'static str],
    /// One-line help text
    pub description: &'static str,
    pub ty: SettingType,
    pub set: SettingSetter<T>,
}
