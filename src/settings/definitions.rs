//! Settings definitions
//! Declarative table of every `set` option

use super::descriptor::{SettingDescriptor, SettingError, SettingType, SettingValue};
use super::registry::SettingsRegistry;
use super::NavSettings;
use crate::granularity::Granularity;
use crate::walker::{MathDomain, MathTraversal};

fn set_line_width(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Integer(n) => {
            settings.line_width = n;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected integer".to_string())),
    }
}

fn set_granularity(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Enum(name) => {
            settings.initial_granularity = name
                .parse::<Granularity>()
                .map_err(|e| SettingError::ValidationError(e.message))?;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected enum".to_string())),
    }
}

fn set_math_domain(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Enum(name) => {
            settings.math_domain = name
                .parse::<MathDomain>()
                .map_err(|e| SettingError::ValidationError(e.message))?;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected enum".to_string())),
    }
}

fn set_math_traversal(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Enum(name) => {
            settings.math_traversal = name
                .parse::<MathTraversal>()
                .map_err(|e| SettingError::ValidationError(e.message))?;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected enum".to_string())),
    }
}

fn set_math_explore(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Bool(b) => {
            settings.math_explore = b;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected boolean".to_string())),
    }
}

fn set_force_layout(settings: &mut NavSettings, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Bool(b) => {
            settings.force_layout_tables = b;
            Ok(())
        }
        _ => Err(SettingError::ValidationError("Expected boolean".to_string())),
    }
}

const SETTINGS: &[SettingDescriptor<NavSettings>] = &[
    SettingDescriptor {
        name: "linewidth",
        aliases: &["lw"],
        description: "Columns a display line wraps at",
        ty: SettingType::Integer {
            min: Some(1),
            max: Some(1000),
        },
        set: set_line_width,
    },
    SettingDescriptor {
        name: "granularity",
        aliases: &["gran"],
        description: "Granularity a new session starts at",
        ty: SettingType::Enum {
            variants: &[
                "character",
                "word",
                "line",
                "sentence",
                "object",
                "group",
                "visual",
            ],
        },
        set: set_granularity,
    },
    SettingDescriptor {
        name: "mathdomain",
        aliases: &["md"],
        description: "Speech rules for math",
        ty: SettingType::Enum {
            variants: &["default", "mathspeak", "clearspeak"],
        },
        set: set_math_domain,
    },
    SettingDescriptor {
        name: "mathtraversal",
        aliases: &["mt"],
        description: "Walk math by leaf or by syntax tree",
        ty: SettingType::Enum {
            variants: &["leaf", "tree"],
        },
        set: set_math_traversal,
    },
    SettingDescriptor {
        name: "explore",
        aliases: &["ex"],
        description: "Descend into math sub-expressions in tree traversal",
        ty: SettingType::Boolean,
        set: set_math_explore,
    },
    SettingDescriptor {
        name: "forcelayout",
        aliases: &["fl"],
        description: "Allow table mode on layout tables",
        ty: SettingType::Boolean,
        set: set_force_layout,
    },
];

/// Create the settings registry
#[must_use]
pub fn create_settings_registry() -> SettingsRegistry<NavSettings> {
    SettingsRegistry::new(SETTINGS)
}
