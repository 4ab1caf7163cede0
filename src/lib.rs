//! monster-nav - granularity-aware content navigation for screen readers
//!
//! A [`navigator::Navigator`] owns one [`walker::Walker`] per
//! [`granularity::Granularity`] and decides which of them moves the
//! cursor: the granularity the user chose, a one-level subnavigation
//! override, or the table and math modes that take over the GROUP slot.

pub mod document;
pub mod error;
pub mod granularity;
pub mod movement;
pub mod navigator;
pub mod script;
pub mod selection;
pub mod settings;
pub mod store;
pub mod walker;

#[cfg(test)]
pub(crate) mod test_utils;
