//! Centralized error handling for monster-nav
//! Defines common error types, severity levels, and error codes
//!
//! Navigation itself never fails: reaching the edge of the content or
//! asking for a table outside of one yields `None`. Errors only come from
//! the edges of the crate (loading documents, reading state files,
//! applying settings, parsing command scripts).

use std::fmt;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - operation failed but the session can continue
    Error,
    /// Critical error - the session cannot continue
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// File system or I/O errors
    Io,
    /// Script or value parsing errors
    Parse,
    /// Configuration or settings errors
    Settings,
    /// Malformed document content
    Document,
    /// Session store encode/decode errors
    Store,
    /// Internal logic or invariant violations
    Internal,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::Parse => write!(f, "Parse"),
            Self::Settings => write!(f, "Settings"),
            Self::Document => write!(f, "Document"),
            Self::Store => write!(f, "Store"),
            Self::Internal => write!(f, "Internal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error in monster-nav
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorType,
    /// Machine-readable error code (e.g., "UNKNOWN_NODE_KIND")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl NavError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new critical error (Severity: Critical)
    pub fn critical(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for NavError {}

impl From<String> for NavError {
    fn from(msg: String) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<&str> for NavError {
    fn from(msg: &str) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<std::io::Error> for NavError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorType::Io, "IO_ERROR", err.to_string())
    }
}

impl From<serde_json::Error> for NavError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorType::Parse, "JSON_ERROR", err.to_string())
    }
}

/// Result alias for monster-nav operations
pub type Result<T> = std::result::Result<T, NavError>;
