//! Tests for navigation settings

use super::*;

fn registry() -> SettingsRegistry<NavSettings> {
    create_settings_registry()
}

#[test]
fn test_defaults() {
    let settings = NavSettings::default();
    assert_eq!(settings.line_width, 80);
    assert_eq!(settings.initial_granularity, Granularity::Group);
    assert_eq!(settings.math_domain, MathDomain::Default);
    assert_eq!(settings.math_traversal, MathTraversal::Leaf);
    assert!(!settings.math_explore);
    assert!(!settings.force_layout_tables);
}

#[test]
fn test_from_json_partial() {
    let settings = NavSettings::from_json(
        r#"{"line_width": 40, "initial_granularity": "word", "math_domain": "clearspeak"}"#,
    )
    .unwrap();
    assert_eq!(settings.line_width, 40);
    assert_eq!(settings.initial_granularity, Granularity::Word);
    assert_eq!(settings.math_domain, MathDomain::ClearSpeak);
    assert_eq!(settings.math_traversal, MathTraversal::Leaf);
}

#[test]
fn test_from_json_errors() {
    let err = NavSettings::from_json(r#"{"initial_granularity": "paragraph"}"#).unwrap_err();
    assert_eq!(err.kind, ErrorType::Settings);
    assert_eq!(err.code, "INVALID_SETTINGS");

    let err = NavSettings::from_json(r#"{"line_width": 0}"#).unwrap_err();
    assert!(err.contains_msg("line_width"));
}

#[test]
fn test_settings_json_round_trip() {
    let settings = NavSettings {
        math_explore: true,
        ..NavSettings::default()
    };
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"initial_granularity\":\"group\""));
    assert_eq!(NavSettings::from_json(&json).unwrap(), settings);
}

#[test]
fn test_parse_boolean() {
    for input in ["true", "1", "on", "yes", "ON"] {
        assert_eq!(
            SettingsRegistry::<NavSettings>::parse_value(&SettingType::Boolean, input),
            Ok(SettingValue::Bool(true))
        );
    }
    for input in ["false", "0", "off", "no"] {
        assert_eq!(
            SettingsRegistry::<NavSettings>::parse_value(&SettingType::Boolean, input),
            Ok(SettingValue::Bool(false))
        );
    }
    assert!(matches!(
        SettingsRegistry::<NavSettings>::parse_value(&SettingType::Boolean, "maybe"),
        Err(SettingError::ParseError(_))
    ));
}

#[test]
fn test_parse_integer_bounds() {
    let ty = SettingType::Integer {
        min: Some(1),
        max: Some(10),
    };
    assert_eq!(
        SettingsRegistry::<NavSettings>::parse_value(&ty, "5"),
        Ok(SettingValue::Integer(5))
    );
    assert!(matches!(
        SettingsRegistry::<NavSettings>::parse_value(&ty, "0"),
        Err(SettingError::ValidationError(_))
    ));
    assert!(matches!(
        SettingsRegistry::<NavSettings>::parse_value(&ty, "11"),
        Err(SettingError::ValidationError(_))
    ));
    assert!(matches!(
        SettingsRegistry::<NavSettings>::parse_value(&ty, "ten"),
        Err(SettingError::ParseError(_))
    ));
}

#[test]
fn test_parse_enum_canonicalizes_case() {
    let ty = SettingType::Enum {
        variants: &["leaf", "tree"],
    };
    assert_eq!(
        SettingsRegistry::<NavSettings>::parse_value(&ty, "TREE"),
        Ok(SettingValue::Enum("tree".to_string()))
    );
    assert!(SettingsRegistry::<NavSettings>::parse_value(&ty, "graph").is_err());
}

#[test]
fn test_resolve_names_aliases_and_prefixes() {
    let reg = registry();
    assert_eq!(reg.resolve("linewidth").unwrap().name, "linewidth");
    assert_eq!(reg.resolve("lw").unwrap().name, "linewidth");
    assert_eq!(reg.resolve("LW").unwrap().name, "linewidth");
    assert_eq!(reg.resolve("forcel").unwrap().name, "forcelayout");

    assert!(matches!(
        reg.resolve("math"),
        Err(SettingError::AmbiguousOption { .. })
    ));
    assert!(matches!(reg.resolve("volume"), Err(SettingError::UnknownOption(_))));
}

#[test]
fn test_execute_every_setting() {
    let reg = registry();
    let mut settings = NavSettings::default();

    reg.execute_setting("linewidth", "40", &mut settings).unwrap();
    reg.execute_setting("granularity", "sentence", &mut settings).unwrap();
    reg.execute_setting("md", "MathSpeak", &mut settings).unwrap();
    reg.execute_setting("mt", "tree", &mut settings).unwrap();
    reg.execute_setting("explore", "on", &mut settings).unwrap();
    reg.execute_setting("fl", "yes", &mut settings).unwrap();

    assert_eq!(
        settings,
        NavSettings {
            line_width: 40,
            initial_granularity: Granularity::Sentence,
            math_domain: MathDomain::MathSpeak,
            math_traversal: MathTraversal::Tree,
            math_explore: true,
            force_layout_tables: true,
        }
    );
}

#[test]
fn test_execute_rejects_bad_value_without_change() {
    let reg = registry();
    let mut settings = NavSettings::default();
    assert!(reg.execute_setting("linewidth", "0", &mut settings).is_err());
    assert!(reg.execute_setting("granularity", "page", &mut settings).is_err());
    assert_eq!(settings, NavSettings::default());
}

#[test]
fn test_apply_assignment() {
    let mut settings = NavSettings::default();
    settings.apply("lw=20").unwrap();
    assert_eq!(settings.line_width, 20);

    let err = settings.apply("lw").unwrap_err();
    assert_eq!(err.code, "SETTING_PARSE_ERROR");

    let err = settings.apply("volume=3").unwrap_err();
    assert_eq!(err.code, "UNKNOWN_SETTING");
    assert_eq!(err.kind, ErrorType::Settings);
}

#[test]
fn test_setting_error_display() {
    assert_eq!(
        SettingError::UnknownOption("foo".to_string()).to_string(),
        "Unknown option: foo"
    );
    let err = SettingError::AmbiguousOption {
        prefix: "math".to_string(),
        matches: vec!["mathdomain".to_string(), "mathtraversal".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Ambiguous option 'math': matches mathdomain, mathtraversal"
    );
}

#[test]
fn test_every_descriptor_has_help_text() {
    for desc in registry().descriptors() {
        assert!(!desc.description.is_empty(), "{} has no description", desc.name);
    }
}
