use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{BridgeError, BridgeResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> BridgeResult<f64> {
    value.to_f64().ok_or_else(|| {
        BridgeError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// The remote engine keys bars by epoch milliseconds.
#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

pub(crate) fn ensure_finite(value: f64, field_name: &str) -> BridgeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BridgeError::InvalidData(format!(
            "{field_name} must be finite"
        )))
    }
}
