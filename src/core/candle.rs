use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64, ensure_finite};
use crate::error::{BridgeError, BridgeResult};

/// One OHLC bar as the remote engine consumes it.
///
/// Fields are public so hosts can deserialize bars straight from their own
/// feeds. `extra` keeps any additional keys (custom indicator inputs) and
/// flattens them back onto the wire object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KLineData {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KLineData {
    /// Builds a validated bar from raw floating values.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> BridgeResult<Self> {
        let open = ensure_finite(open, "open")?;
        let high = ensure_finite(high, "high")?;
        let low = ensure_finite(low, "low")?;
        let close = ensure_finite(close, "close")?;

        if low > high {
            return Err(BridgeError::InvalidData(
                "kline low must be <= high".to_owned(),
            ));
        }
        if open < low || open > high || close < low || close > high {
            return Err(BridgeError::InvalidData(
                "kline open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
            turnover: None,
            extra: Map::new(),
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> BridgeResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    pub fn with_volume(mut self, volume: f64) -> BridgeResult<Self> {
        self.volume = Some(ensure_finite(volume, "volume")?);
        Ok(self)
    }

    pub fn with_turnover(mut self, turnover: f64) -> BridgeResult<Self> {
        self.turnover = Some(ensure_finite(turnover, "turnover")?);
        Ok(self)
    }

    /// Attaches an extra key that travels next to the OHLC fields.
    ///
    /// Reserved OHLC keys are rejected so the flattened object stays unambiguous.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> BridgeResult<Self> {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(BridgeError::InvalidData(format!(
                "extra key `{key}` collides with a kline field"
            )));
        }
        self.extra.insert(key, value);
        Ok(self)
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

const RESERVED_KEYS: [&str; 7] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "turnover",
];
