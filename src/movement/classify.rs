//! Character classification for movement operations

/// Character categories for word movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Whitespace characters (space, tab, newline, etc.)
    Whitespace,
    /// Alphanumeric characters and underscore
    Alphanumeric,
    /// Symbols and punctuation
    Symbol,
}

/// Classify a character for word boundary detection
pub fn classify_char(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Alphanumeric
    } else {
        CharClass::Symbol
    }
}

/// Check if a character indicates sentence end
pub fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}
