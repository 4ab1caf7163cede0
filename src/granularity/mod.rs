//! Navigation granularity definitions
//!
//! Ranks run from `Character` (0, most granular) to `Visual` (6, least
//! granular). Only the two extremes are guaranteed; everything in between
//! is the fixed configuration of this crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorType, NavError};

/// Unit of movement for the navigator
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Single characters inside text
    Character,
    /// Words (runs of alphanumerics or symbols)
    Word,
    /// Wrapped display lines
    Line,
    /// Sentences
    Sentence,
    /// Leaf objects (text runs, links, images, buttons)
    Object,
    /// Structural groups (paragraphs, headings, list items, cells)
    #[default]
    Group,
    /// Top-level visual regions
    Visual,
}

impl Granularity {
    /// All granularities ordered by rank
    pub const ALL: [Granularity; 7] = [
        Granularity::Character,
        Granularity::Word,
        Granularity::Line,
        Granularity::Sentence,
        Granularity::Object,
        Granularity::Group,
        Granularity::Visual,
    ];

    /// Most granular rank
    pub const MOST_GRANULAR: Granularity = Granularity::Character;

    /// Least granular rank
    pub const LEAST_GRANULAR: Granularity = Granularity::Visual;

    /// Integer rank in `0..=6`
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Look up a granularity by rank. Returns `None` outside `0..=6`.
    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// One step more granular, clamped at `Character`
    #[must_use]
    pub fn more_granular(self) -> Self {
        Self::from_rank(self.rank().saturating_sub(1)).unwrap_or(Self::MOST_GRANULAR)
    }

    /// One step less granular, clamped at `Visual`
    #[must_use]
    pub fn less_granular(self) -> Self {
        Self::from_rank(self.rank() + 1).unwrap_or(Self::LEAST_GRANULAR)
    }

    /// Canonical lowercase name, used by settings and scripts
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Word => "word",
            Self::Line => "line",
            Self::Sentence => "sentence",
            Self::Object => "object",
            Self::Group => "group",
            Self::Visual => "visual",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Ok(rank) = lower.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| {
                NavError::new(
                    ErrorType::Parse,
                    "INVALID_GRANULARITY",
                    format!("Granularity rank out of range: {rank}"),
                )
            });
        }
        let found = match lower.as_str() {
            "character" | "char" | "c" => Some(Self::Character),
            "word" | "w" => Some(Self::Word),
            "line" | "l" => Some(Self::Line),
            "sentence" | "s" => Some(Self::Sentence),
            "object" | "obj" | "o" => Some(Self::Object),
            "group" | "g" => Some(Self::Group),
            "visual" | "v" => Some(Self::Visual),
            _ => None,
        };
        found.ok_or_else(|| {
            NavError::new(
                ErrorType::Parse,
                "INVALID_GRANULARITY",
                format!("Unknown granularity: {s}"),
            )
        })
    }
}
