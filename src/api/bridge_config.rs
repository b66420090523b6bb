use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bootstrap::FontFace;
use crate::core::{ChartOptions, IndicatorSpec, KLineData, Precision};
use crate::error::{BridgeError, BridgeResult};

use super::HostState;

/// Engine bundle used when the host does not configure one.
pub const DEFAULT_ENGINE_SOURCE_URL: &str =
    "https://cdn.jsdelivr.net/npm/klinecharts@10.0.0-alpha2/dist/umd/klinecharts.min.js";

/// Public bridge configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    #[serde(default = "default_engine_source_url")]
    pub engine_source_url: String,
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(default)]
    pub precision: Option<Precision>,
    #[serde(default)]
    pub data_list: Option<Vec<KLineData>>,
    #[serde(default)]
    pub indicators: Option<Vec<IndicatorSpec>>,
    #[serde(default)]
    pub font_faces: Vec<FontFace>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_fade_in_on_init")]
    pub fade_in_on_init: bool,
    #[serde(default = "default_fade_in_duration_ms")]
    pub fade_in_duration_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(ChartOptions::default())
    }
}

impl BridgeConfig {
    /// Creates a config with the default engine bundle and no watched data.
    #[must_use]
    pub fn new(options: ChartOptions) -> Self {
        Self {
            engine_source_url: default_engine_source_url(),
            options,
            precision: None,
            data_list: None,
            indicators: None,
            font_faces: Vec::new(),
            debug: false,
            fade_in_on_init: default_fade_in_on_init(),
            fade_in_duration_ms: default_fade_in_duration_ms(),
        }
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            BridgeError::InvalidConfig(format!("failed to parse bridge config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.engine_source_url.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "engine source url must not be empty".to_owned(),
            ));
        }
        for font in &self.font_faces {
            font.validate()
                .map_err(|e| BridgeError::InvalidConfig(e.to_string()))?;
        }
        Ok(())
    }

    /// Sets the location the engine bundle is fetched from.
    #[must_use]
    pub fn with_engine_source_url(mut self, url: impl Into<String>) -> Self {
        self.engine_source_url = url.into();
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub fn with_data_list(mut self, data_list: Vec<KLineData>) -> Self {
        self.data_list = Some(data_list);
        self
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: Vec<IndicatorSpec>) -> Self {
        self.indicators = Some(indicators);
        self
    }

    #[must_use]
    pub fn with_font_face(mut self, font: FontFace) -> Self {
        self.font_faces.push(font);
        self
    }

    /// Enables the counted debug trace.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Configures the entrance transition hint; `None` disables it.
    #[must_use]
    pub fn with_fade_in(mut self, duration: Option<Duration>) -> Self {
        match duration {
            Some(duration) => {
                self.fade_in_on_init = true;
                self.fade_in_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
            }
            None => self.fade_in_on_init = false,
        }
        self
    }

    #[must_use]
    pub fn fade_in_duration(&self) -> Option<Duration> {
        self.fade_in_on_init
            .then(|| Duration::from_millis(self.fade_in_duration_ms))
    }

    /// Initial watched host state described by this config.
    #[must_use]
    pub fn host_state(&self) -> HostState {
        HostState {
            options: self.options.clone(),
            precision: self.precision,
            data_list: self.data_list.clone(),
            data_more: None,
            indicators: self.indicators.clone(),
        }
    }
}

fn default_engine_source_url() -> String {
    DEFAULT_ENGINE_SOURCE_URL.to_owned()
}

fn default_fade_in_on_init() -> bool {
    true
}

fn default_fade_in_duration_ms() -> u64 {
    500
}
