use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{IndicatorValue, PaneOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThousandsSeparator {
    pub sign: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalFold {
    pub threshold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutChildType {
    #[serde(rename = "candle")]
    Candle,
    #[serde(rename = "indicator")]
    Indicator,
    #[serde(rename = "xAxis")]
    XAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutChild {
    #[serde(rename = "type")]
    pub child_type: LayoutChildType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<IndicatorValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PaneOptions>,
}

/// Engine construction options sent with `init`.
///
/// `styles` is a deep-partial style tree owned by the engine; the bridge only
/// forwards it and watches it for changes. Formatter callbacks cannot cross the
/// message channel and are therefore not representable here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thousands_separator: Option<ThousandsSeparator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_fold: Option<DecimalFold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutChild>>,
}

impl ChartOptions {
    #[must_use]
    pub fn with_styles(mut self, styles: Value) -> Self {
        self.styles = Some(styles);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

/// Pagination direction of a dataset load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDataType {
    Init,
    Forward,
    Backward,
}

/// Per-direction "more data available" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadDataMore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backward: Option<bool>,
}

/// Auxiliary `more` argument of `applyNewData`.
///
/// The engine accepts either a single flag or per-direction flags. The default
/// (`false`) is a fresh, non-paginated load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplyDataMore {
    Flag(bool),
    Directions(LoadDataMore),
}

impl Default for ApplyDataMore {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl ApplyDataMore {
    #[must_use]
    pub fn from_load_type(load_type: LoadDataType) -> Self {
        match load_type {
            LoadDataType::Init => Self::default(),
            LoadDataType::Forward => Self::Directions(LoadDataMore {
                forward: Some(true),
                backward: None,
            }),
            LoadDataType::Backward => Self::Directions(LoadDataMore {
                forward: None,
                backward: Some(true),
            }),
        }
    }

    /// Classifies the load. A bare `true` flag marks more history behind the
    /// loaded window, which the engine pages in backwards.
    #[must_use]
    pub fn load_type(self) -> LoadDataType {
        match self {
            Self::Flag(false) => LoadDataType::Init,
            Self::Flag(true) => LoadDataType::Backward,
            Self::Directions(more) => match (more.forward, more.backward) {
                (Some(true), _) => LoadDataType::Forward,
                (_, Some(true)) => LoadDataType::Backward,
                _ => LoadDataType::Init,
            },
        }
    }
}
