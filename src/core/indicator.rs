use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::PaneOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorSeries {
    Normal,
    Price,
    Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorFigure {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub figure_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,
}

/// Full indicator declaration. Only `name` is required; everything else falls
/// back to the engine's built-in template for that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_params: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_ohlc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_format_big_number: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<IndicatorSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figures: Option<Vec<IndicatorFigure>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
}

impl IndicatorCreate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            pane_id: None,
            short_name: None,
            precision: None,
            calc_params: None,
            should_ohlc: None,
            should_format_big_number: None,
            visible: None,
            z_level: None,
            extend_data: None,
            series: None,
            figures: None,
            min_value: None,
            max_value: None,
            styles: None,
        }
    }

    #[must_use]
    pub fn with_calc_params(mut self, params: Vec<Value>) -> Self {
        self.calc_params = Some(params);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Indicator reference: either a built-in template name or a full declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Name(String),
    Create(Box<IndicatorCreate>),
}

impl From<&str> for IndicatorValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for IndicatorValue {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<IndicatorCreate> for IndicatorValue {
    fn from(create: IndicatorCreate) -> Self {
        Self::Create(Box::new(create))
    }
}

/// One entry of the host's watched indicator list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSpec {
    pub value: IndicatorValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stack: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane_options: Option<PaneOptions>,
}

impl IndicatorSpec {
    #[must_use]
    pub fn new(value: impl Into<IndicatorValue>) -> Self {
        Self {
            value: value.into(),
            is_stack: None,
            pane_options: None,
        }
    }

    #[must_use]
    pub fn stacked(mut self, is_stack: bool) -> Self {
        self.is_stack = Some(is_stack);
        self
    }

    #[must_use]
    pub fn on_pane(mut self, pane_options: PaneOptions) -> Self {
        self.pane_options = Some(pane_options);
        self
    }
}
