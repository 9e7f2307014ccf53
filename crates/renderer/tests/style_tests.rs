//! Tests for color ramp configuration parsing.

use renderer::style::{hex_to_rgb, named_color, Color, ColorRampConfig};
use renderer::{RenderError, Rgb, AQI_BREAKPOINTS, DEFAULT_LUT_SIZE};
use std::io::Write;

#[test]
fn test_parse_mixed_color_formats() {
    let json = r##"{
        "color_stops": ["green", "#FFFF00", [255, 165, 0], "Maroon"]
    }"##;
    let config = ColorRampConfig::from_json(json).unwrap();

    assert_eq!(config.lut_size, DEFAULT_LUT_SIZE);
    assert!(config.breakpoints.is_empty());
    assert_eq!(
        config.resolve_stops().unwrap(),
        vec![
            Rgb::new(0, 128, 0),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 165, 0),
            Rgb::new(128, 0, 0),
        ]
    );
}

#[test]
fn test_default_matches_aqi_ramp() {
    let config = ColorRampConfig::default();
    assert_eq!(config.color_stops.len(), 6);
    assert_eq!(config.color_stops[0], Color::Named("green".to_string()));
    assert_eq!(config.breakpoints, AQI_BREAKPOINTS);
}

#[test]
fn test_config_serde_roundtrip() {
    let config = ColorRampConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ColorRampConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_validate_rejects_bad_config() {
    let unordered = ColorRampConfig {
        breakpoints: vec![0.0, 100.0, 50.0],
        ..Default::default()
    };
    assert!(matches!(unordered.validate(), Err(RenderError::InvalidRamp(_))));

    let tiny_lut = ColorRampConfig {
        lut_size: 1,
        ..Default::default()
    };
    assert!(tiny_lut.validate().is_err());
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        ColorRampConfig::from_json("{\"color_stops\": 3}"),
        Err(RenderError::Parse(_))
    ));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"color_stops": ["white", "black"], "lut_size": 16}}"#).unwrap();

    let config = ColorRampConfig::from_file(file.path()).unwrap();
    assert_eq!(config.lut_size, 16);
    config.validate().unwrap();

    assert!(matches!(
        ColorRampConfig::from_file("/nonexistent/ramp.json"),
        Err(RenderError::Io { .. })
    ));
}

#[test]
fn test_color_lookup() {
    assert_eq!(named_color("ORANGE"), Some(Rgb::new(255, 165, 0)));
    assert_eq!(named_color("grey"), named_color("gray"));
    assert_eq!(named_color("plaid"), None);
    assert_eq!(hex_to_rgb("#800080"), Some(Rgb::new(128, 0, 128)));
    assert!(Color::Named("#12".into()).to_rgb().is_err());
}

#[test]
fn test_non_ascii_hex_is_unknown_color() {
    // six bytes long, but only four characters
    assert_eq!(hex_to_rgb("#aééb"), None);

    let config = ColorRampConfig::from_json(r##"{"color_stops": ["#aééb", "black"]}"##).unwrap();
    assert!(matches!(
        renderer::ColorRamp::from_config(&config),
        Err(RenderError::UnknownColor(name)) if name == "#aééb"
    ));
}
