use std::time::Duration;

use kline_bridge::BridgeError;
use kline_bridge::api::{BridgeConfig, DEFAULT_ENGINE_SOURCE_URL};
use kline_bridge::bootstrap::FontFace;
use kline_bridge::core::{IndicatorSpec, IndicatorValue, Precision};
use serde_json::json;

#[test]
fn defaults_match_documented_values() {
    let config = BridgeConfig::default();

    assert_eq!(config.engine_source_url, DEFAULT_ENGINE_SOURCE_URL);
    assert!(config.engine_source_url.contains("klinecharts@10.0.0-alpha2"));
    assert!(!config.debug);
    assert_eq!(config.fade_in_duration(), Some(Duration::from_millis(500)));
    assert!(config.font_faces.is_empty());
    assert!(config.validate().is_ok());

    let state = config.host_state();
    assert!(state.precision.is_none());
    assert!(state.data_list.is_none());
    assert!(state.indicators.is_none());
}

#[test]
fn empty_json_document_yields_defaults() {
    let config = BridgeConfig::from_json_str("{}").expect("config");
    assert_eq!(config, BridgeConfig::default());
}

#[test]
fn json_config_uses_camel_case_keys() {
    let config = BridgeConfig::from_json_str(
        r#"{
            "engineSourceUrl": "https://cdn.example.test/klinecharts.js",
            "options": {"locale": "zh-CN", "styles": {"grid": {"show": false}}},
            "precision": {"price": 4, "volume": 2},
            "indicators": [{"value": "MA"}, {"value": "VOL", "isStack": true}],
            "fontFaces": [{"fontFamily": "Roboto", "base64": "data:font/ttf;base64,AA=="}],
            "debug": true,
            "fadeInOnInit": false
        }"#,
    )
    .expect("config");

    assert_eq!(config.engine_source_url, "https://cdn.example.test/klinecharts.js");
    assert_eq!(config.options.locale.as_deref(), Some("zh-CN"));
    assert_eq!(config.options.styles, Some(json!({"grid": {"show": false}})));
    assert_eq!(config.precision, Some(Precision::new(4, 2)));
    assert_eq!(
        config.indicators,
        Some(vec![
            IndicatorSpec::new("MA"),
            IndicatorSpec::new(IndicatorValue::Name("VOL".to_owned())).stacked(true),
        ])
    );
    assert_eq!(config.font_faces[0].family(), "Roboto");
    assert!(config.debug);
    assert_eq!(config.fade_in_duration(), None);
}

#[test]
fn malformed_json_is_an_invalid_config() {
    let err = BridgeConfig::from_json_str("{\"debug\": \"yes\"}").expect_err("bad type");
    assert!(matches!(err, BridgeError::InvalidConfig(_)));
}

#[test]
fn blank_engine_source_is_rejected() {
    let err = BridgeConfig::from_json_str(r#"{"engineSourceUrl": "  "}"#).expect_err("blank");
    assert!(matches!(err, BridgeError::InvalidConfig(_)));
    assert!(BridgeConfig::default().with_engine_source_url("").validate().is_err());
}

#[test]
fn invalid_font_faces_surface_as_config_errors() {
    let err = BridgeConfig::from_json_str(
        r#"{"fontFaces": [{"fontFamily": "", "base64": "data:font/ttf;base64,AA=="}]}"#,
    )
    .expect_err("empty family");
    assert!(matches!(err, BridgeError::InvalidConfig(_)));
}

#[test]
fn builders_compose() {
    let font = FontFace::from_truetype_bytes("Inter", b"ttf").expect("font");
    let config = BridgeConfig::default()
        .with_precision(Precision::price_only(6))
        .with_data_list(Vec::new())
        .with_indicators(vec![IndicatorSpec::new("BOLL")])
        .with_font_face(font.clone())
        .with_debug(true)
        .with_fade_in(Some(Duration::from_millis(250)));

    assert_eq!(config.font_faces, vec![font]);
    assert_eq!(config.fade_in_duration(), Some(Duration::from_millis(250)));
    let state = config.host_state();
    assert_eq!(state.precision, Some(Precision::price_only(6)));
    assert_eq!(state.data_list, Some(Vec::new()));
    assert_eq!(state.indicators.map(|list| list.len()), Some(1));
}

#[test]
fn config_round_trips_through_json() {
    let config = BridgeConfig::default()
        .with_precision(Precision::new(2, 0))
        .with_debug(true);
    let text = serde_json::to_string(&config).expect("serialize");
    assert_eq!(BridgeConfig::from_json_str(&text).expect("parse"), config);
}
