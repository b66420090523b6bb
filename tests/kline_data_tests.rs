use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use kline_bridge::core::KLineData;
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn kline_validation_rejects_inconsistent_prices() {
    assert!(KLineData::new(0, 10.0, 9.0, 11.0, 10.0).is_err());
    assert!(KLineData::new(0, 12.0, 11.0, 9.0, 10.0).is_err());
    assert!(KLineData::new(0, 10.0, 11.0, 9.0, 8.0).is_err());
    assert!(KLineData::new(0, f64::NAN, 11.0, 9.0, 10.0).is_err());
    assert!(KLineData::new(0, 10.0, f64::INFINITY, 9.0, 10.0).is_err());
}

#[test]
fn kline_accepts_flat_bar() {
    let bar = KLineData::new(0, 5.0, 5.0, 5.0, 5.0).expect("flat bar");
    assert!(bar.is_bullish());
}

#[test]
fn decimal_and_datetime_input_convert_to_wire_units() {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid time");
    let bar = KLineData::from_decimal_time(
        time,
        Decimal::new(10_125, 2),
        Decimal::new(10_250, 2),
        Decimal::new(10_000, 2),
        Decimal::new(10_050, 2),
    )
    .expect("bar");

    assert_eq!(bar.timestamp, 1_704_164_645_000);
    assert_relative_eq!(bar.open, 101.25);
    assert_relative_eq!(bar.close, 100.5);
    assert!(!bar.is_bullish());
}

#[test]
fn volume_and_turnover_must_be_finite() {
    let bar = KLineData::new(0, 1.0, 2.0, 0.5, 1.5).expect("bar");
    assert!(bar.clone().with_volume(f64::NAN).is_err());
    assert!(bar.with_turnover(f64::NEG_INFINITY).is_err());
}

#[test]
fn wire_shape_omits_missing_volume_and_flattens_extras() {
    let bar = KLineData::new(1_000, 1.0, 2.0, 0.5, 1.5)
        .expect("bar")
        .with_extra("openInterest", json!(42))
        .expect("extra");

    assert_eq!(
        serde_json::to_value(&bar).expect("json"),
        json!({
            "timestamp": 1000,
            "open": 1.0,
            "high": 2.0,
            "low": 0.5,
            "close": 1.5,
            "openInterest": 42
        })
    );
}

#[test]
fn extras_cannot_shadow_bar_fields() {
    let bar = KLineData::new(0, 1.0, 2.0, 0.5, 1.5).expect("bar");
    assert!(bar.clone().with_extra("close", json!(3.0)).is_err());
    assert!(bar.with_extra("volume", json!(1)).is_err());
}

#[test]
fn host_feeds_deserialize_with_unknown_keys_kept() {
    let bar: KLineData = serde_json::from_value(json!({
        "timestamp": 60_000,
        "open": 1.0,
        "high": 2.0,
        "low": 0.5,
        "close": 1.5,
        "volume": 10.0,
        "trades": 7
    }))
    .expect("deserialize");

    assert_eq!(bar.volume, Some(10.0));
    assert_eq!(bar.turnover, None);
    assert_eq!(bar.extra.get("trades"), Some(&json!(7)));
}
