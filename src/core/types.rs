use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pixel coordinate inside the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Decimal places used by the remote engine for price and volume labels.
///
/// Both halves are optional: only the provided ones are overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Precision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
}

impl Precision {
    #[must_use]
    pub fn new(price: u32, volume: u32) -> Self {
        Self {
            price: Some(price),
            volume: Some(volume),
        }
    }

    #[must_use]
    pub fn price_only(price: u32) -> Self {
        Self {
            price: Some(price),
            volume: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneState {
    Normal,
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneOptions {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PaneState>,
    /// Axis overrides are engine-defined and passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Value>,
}

impl PaneOptions {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            height: None,
            min_height: None,
            drag_enabled: None,
            order: None,
            state: None,
            axis: None,
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: PaneState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Selects which indicators a remove call targets. Omit the filter entirely
/// to remove every indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IndicatorFilter {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_pane(pane_id: impl Into<String>) -> Self {
        Self {
            pane_id: Some(pane_id.into()),
            ..Self::default()
        }
    }
}
