//! Navigation settings
//!
//! [`NavSettings`] holds everything a session is configured with. Values
//! come from a JSON file (every field optional) and can be changed by name
//! through the declarative `set` registry in [`definitions`].

pub mod definitions;
pub mod descriptor;
pub mod registry;

pub use definitions::create_settings_registry;
pub use descriptor::{SettingDescriptor, SettingError, SettingSetter, SettingType, SettingValue};
pub use registry::SettingsRegistry;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorType, NavError, Result};
use crate::granularity::Granularity;
use crate::walker::{MathDomain, MathTraversal};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// Columns a display line wraps at for the line walker
    pub line_width: usize,
    pub initial_granularity: Granularity,
    pub math_domain: MathDomain,
    pub math_traversal: MathTraversal,
    pub math_explore: bool,
    /// Enter table mode on layout tables as well
    pub force_layout_tables: bool,
}

impl Default for NavSettings {
    fn default() -> Self {
        NavSettings {
            line_width: 80,
            initial_granularity: Granularity::Group,
            math_domain: MathDomain::Default,
            math_traversal: MathTraversal::Leaf,
            math_explore: false,
            force_layout_tables: false,
        }
    }
}

impl NavSettings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(input: &str) -> Result<Self> {
        let settings: NavSettings = serde_json::from_str(input).map_err(|e| {
            NavError::new(
                ErrorType::Settings,
                "INVALID_SETTINGS",
                format!("Invalid settings: {e}"),
            )
        })?;
        if settings.line_width == 0 {
            return Err(NavError::new(
                ErrorType::Settings,
                "INVALID_SETTINGS",
                "line_width must be greater than 0",
            ));
        }
        Ok(settings)
    }

    /// Apply a `name=value` assignment through the settings registry
    pub fn apply(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            NavError::new(
                ErrorType::Parse,
                "SETTING_PARSE_ERROR",
                format!("Expected name=value, got: {assignment}"),
            )
        })?;
        create_settings_registry().execute_setting(name, value, self)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
