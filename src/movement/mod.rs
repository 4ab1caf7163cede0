//! Movement semantics for text units
//!
//! This module centralizes how a text leaf is cut into characters, words,
//! sentences and display lines for the text walkers.
//!
//! ## Design
//!
//! Word movement is based on character categories:
//! - **Whitespace**: spaces, tabs, newlines
//! - **Alphanumeric**: letters, numbers, and underscore
//! - **Symbol**: all other characters (punctuation, operators, etc.)
//!
//! This means:
//! - `hello_world` is ONE word (underscore is alphanumeric)
//! - `foo->bar` is THREE words: `foo`, `->`, `bar`
//!
//! ## Modules
//!
//! - [`classify`] - Character classification functions
//! - [`boundaries`] - Span segmentation of text leaves

pub mod boundaries;
pub mod classify;

// Re-export commonly used types
pub use boundaries::{char_spans, line_spans, sentence_spans, word_spans};
pub use classify::{classify_char, CharClass};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
