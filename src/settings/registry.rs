//! Settings registry
//! Resolves option names and applies typed values through descriptors

use super::descriptor::{SettingDescriptor, SettingError, SettingType, SettingValue};

/// Settings registry over a static descriptor table
pub struct SettingsRegistry<T: 'static> {
    settings: &'static [SettingDescriptor<T>],
}

impl<T: 'static> Clone for SettingsRegistry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SettingsRegistry<T> {}

impl<T: 'static> SettingsRegistry<T> {
    #[must_use]
    pub const fn new(descriptors: &'static [SettingDescriptor<T>]) -> Self {
        SettingsRegistry {
            settings: descriptors,
        }
    }

    #[must_use]
    pub fn descriptors(&self) -> &'static [SettingDescriptor<T>] {
        self.settings
    }

    /// Find the descriptor for an option name
    ///
    /// Exact names and aliases win; otherwise a prefix of exactly one
    /// canonical name is accepted.
    pub fn resolve(&self, name: &str) -> Result<&'static SettingDescriptor<T>, SettingError> {
        let lower = name.trim().to_lowercase();
        if let Some(desc) = self
            .settings
            .iter()
            .find(|d| d.name == lower || d.aliases.iter().any(|a| *a == lower))
        {
            return Ok(desc);
        }

        let matches: Vec<&'static SettingDescriptor<T>> = self
            .settings
            .iter()
            .filter(|d| !lower.is_empty() && d.name.starts_with(&lower))
            .collect();
        match matches.as_slice() {
            [desc] => Ok(*desc),
            [] => Err(SettingError::UnknownOption(name.to_string())),
            many => Err(SettingError::AmbiguousOption {
                prefix: name.to_string(),
                matches: many.iter().map(|d| d.name.to_string()).collect(),
            }),
        }
    }

    /// Parse string value to `SettingValue` using `SettingType`
    pub(crate) fn parse_value(ty: &SettingType, value: &str) -> Result<SettingValue, SettingError> {
        let value = value.trim();
        match ty {
            SettingType::Boolean => match value.to_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Ok(SettingValue::Bool(true)),
                "false" | "0" | "off" | "no" => Ok(SettingValue::Bool(false)),
                _ => Err(SettingError::ParseError(format!(
                    "Invalid boolean value: {value}"
                ))),
            },
            SettingType::Integer { min, max } => {
                let val = value.parse::<usize>().map_err(|_| {
                    SettingError::ParseError(format!("Invalid integer value: {value}"))
                })?;
                if let Some(min_val) = min {
                    if val < *min_val {
                        return Err(SettingError::ValidationError(format!(
                            "Value {val} is below minimum {min_val}"
                        )));
                    }
                }
                if let Some(max_val) = max {
                    if val > *max_val {
                        return Err(SettingError::ValidationError(format!(
                            "Value {val} is above maximum {max_val}"
                        )));
                    }
                }
                Ok(SettingValue::Integer(val))
            }
            SettingType::Enum { variants } => {
                let val_lower = value.to_lowercase();
                variants
                    .iter()
                    .find(|v| v.to_lowercase() == val_lower)
                    .map(|canonical| SettingValue::Enum(canonical.to_string()))
                    .ok_or_else(|| {
                        SettingError::ParseError(format!(
                            "Invalid enum value: {value}. Valid values: {variants:?}"
                        ))
                    })
            }
        }
    }

    /// Apply `name = value` to `target`
    ///
    /// Flow: resolve the name, parse the value with the descriptor's type,
    /// then hand the typed value to the setter.
    pub fn execute_setting(&self, name: &str, value: &str, target: &mut T) -> Result<(), SettingError> {
        let desc = self.resolve(name)?;
        let typed = Self::parse_value(&desc.ty, value)?;
        (desc.set)(target, typed)?;
        tracing::debug!(setting = desc.name, value, "setting applied");
        Ok(())
    }
}
