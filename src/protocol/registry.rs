//! Catalog of remote chart operations.
//!
//! Every entry has two halves that must agree on parameter names:
//! - the host half, a typed [`ChartOperation`] variant serialized into an
//!   [`Envelope`](super::Envelope);
//! - the remote half, a script fragment run by the dispatcher inside the
//!   rendering surface when `function` matches the entry's wire name.
//!
//! Adding a capability means adding one [`OperationName`], one
//! [`ChartOperation`] variant and one fragment.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{
    ApplyDataMore, ChartOptions, Coordinate, IndicatorFilter, IndicatorValue, KLineData,
    PaneOptions, Precision,
};
use crate::error::{BridgeError, BridgeResult};

use super::codec::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationName {
    SetPrecision,
    Init,
    SetStyles,
    UpdateData,
    ApplyNewData,
    CreateIndicator,
    ScrollByDistance,
    ScrollToRealTime,
    ScrollToDataIndex,
    ScrollToTimestamp,
    ZoomAtCoordinate,
    ZoomAtDataIndex,
    ZoomAtTimestamp,
    Resize,
    RemoveIndicator,
}

impl OperationName {
    /// Registry order; the dispatch script lists fragments in this order.
    pub const ALL: [Self; 15] = [
        Self::SetPrecision,
        Self::Init,
        Self::SetStyles,
        Self::UpdateData,
        Self::ApplyNewData,
        Self::CreateIndicator,
        Self::ScrollByDistance,
        Self::ScrollToRealTime,
        Self::ScrollToDataIndex,
        Self::ScrollToTimestamp,
        Self::ZoomAtCoordinate,
        Self::ZoomAtDataIndex,
        Self::ZoomAtTimestamp,
        Self::Resize,
        Self::RemoveIndicator,
    ];

    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::SetPrecision => "setPrecision",
            Self::Init => "init",
            Self::SetStyles => "setStyles",
            Self::UpdateData => "updateData",
            Self::ApplyNewData => "applyNewData",
            Self::CreateIndicator => "createIndicator",
            Self::ScrollByDistance => "scrollByDistance",
            Self::ScrollToRealTime => "scrollToRealTime",
            Self::ScrollToDataIndex => "scrollToDataIndex",
            Self::ScrollToTimestamp => "scrollToTimestamp",
            Self::ZoomAtCoordinate => "zoomAtCoordinate",
            Self::ZoomAtDataIndex => "zoomAtDataIndex",
            Self::ZoomAtTimestamp => "zoomAtTimestamp",
            Self::Resize => "resize",
            Self::RemoveIndicator => "removeIndicator",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.wire_name() == name)
    }

    /// Remote-side dispatch fragment for this entry.
    ///
    /// Fragments run inside the dispatcher where `functionName`, `params`,
    /// `kchart` and `postToHost` are in scope.
    #[must_use]
    pub const fn dispatch_fragment(self) -> &'static str {
        match self {
            Self::SetPrecision => {
                "
    if (functionName === 'setPrecision') {
        kchart.setPrecision(params.precision);
    }"
            }
            Self::Init => {
                "
    if (functionName === 'init') {
        var container = document.getElementById('container_id');
        while (container.firstChild) {
            container.removeChild(container.firstChild);
        }
        kchart = window.klinecharts.init(container, params.options);
        postToHost('inited');
    }"
            }
            Self::SetStyles => {
                "
    if (functionName === 'setStyles') {
        kchart.setStyles(params.value);
    }"
            }
            Self::UpdateData => {
                "
    if (functionName === 'updateData') {
        kchart.updateData(params.data);
    }"
            }
            Self::ApplyNewData => {
                "
    if (functionName === 'applyNewData') {
        kchart.applyNewData(params.dataList, params.more);
    }"
            }
            Self::CreateIndicator => {
                "
    if (functionName === 'createIndicator') {
        kchart.createIndicator(params.value, params.isStack, params.paneOptions);
    }"
            }
            Self::ScrollByDistance => {
                "
    if (functionName === 'scrollByDistance') {
        kchart.scrollByDistance(params.distance, params.animationDuration);
    }"
            }
            Self::ScrollToRealTime => {
                "
    if (functionName === 'scrollToRealTime') {
        kchart.scrollToRealTime(params.animationDuration);
    }"
            }
            Self::ScrollToDataIndex => {
                "
    if (functionName === 'scrollToDataIndex') {
        kchart.scrollToDataIndex(params.dataIndex, params.animationDuration);
    }"
            }
            Self::ScrollToTimestamp => {
                "
    if (functionName === 'scrollToTimestamp') {
        kchart.scrollToTimestamp(params.timestamp, params.animationDuration);
    }"
            }
            Self::ZoomAtCoordinate => {
                "
    if (functionName === 'zoomAtCoordinate') {
        kchart.zoomAtCoordinate(params.scale, params.coordinate, params.animationDuration);
    }"
            }
            Self::ZoomAtDataIndex => {
                "
    if (functionName === 'zoomAtDataIndex') {
        kchart.zoomAtDataIndex(params.scale, params.dataIndex, params.animationDuration);
    }"
            }
            Self::ZoomAtTimestamp => {
                "
    if (functionName === 'zoomAtTimestamp') {
        kchart.zoomAtTimestamp(params.scale, params.timestamp, params.animationDuration);
    }"
            }
            Self::Resize => {
                "
    if (functionName === 'resize') {
        kchart.resize();
    }"
            }
            Self::RemoveIndicator => {
                "
    if (functionName === 'removeIndicator') {
        if (params.filter) {
            kchart.removeIndicator(params.filter);
        } else {
            kchart.removeIndicator();
        }
    }"
            }
        }
    }
}

impl std::fmt::Display for OperationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Concatenated dispatch fragments of every registry entry.
#[must_use]
pub fn dispatch_script() -> String {
    OperationName::ALL
        .into_iter()
        .map(OperationName::dispatch_fragment)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A typed remote call. Serializes to `{ "function": ..., "params": {...} }`.
///
/// Absent optional fields are omitted from `params`, which the remote side
/// reads as `undefined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "function",
    content = "params",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ChartOperation {
    SetPrecision {
        precision: Precision,
    },
    Init {
        options: ChartOptions,
    },
    SetStyles {
        value: Value,
    },
    UpdateData {
        data: KLineData,
    },
    ApplyNewData {
        data_list: Vec<KLineData>,
        #[serde(default)]
        more: ApplyDataMore,
    },
    CreateIndicator {
        value: IndicatorValue,
        #[serde(default)]
        is_stack: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pane_options: Option<PaneOptions>,
    },
    ScrollByDistance {
        distance: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ScrollToRealTime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ScrollToDataIndex {
        data_index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ScrollToTimestamp {
        timestamp: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ZoomAtCoordinate {
        scale: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinate: Option<Coordinate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ZoomAtDataIndex {
        scale: f64,
        data_index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    ZoomAtTimestamp {
        scale: f64,
        timestamp: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_duration: Option<u64>,
    },
    Resize {},
    RemoveIndicator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<IndicatorFilter>,
    },
}

impl ChartOperation {
    #[must_use]
    pub fn name(&self) -> OperationName {
        match self {
            Self::SetPrecision { .. } => OperationName::SetPrecision,
            Self::Init { .. } => OperationName::Init,
            Self::SetStyles { .. } => OperationName::SetStyles,
            Self::UpdateData { .. } => OperationName::UpdateData,
            Self::ApplyNewData { .. } => OperationName::ApplyNewData,
            Self::CreateIndicator { .. } => OperationName::CreateIndicator,
            Self::ScrollByDistance { .. } => OperationName::ScrollByDistance,
            Self::ScrollToRealTime { .. } => OperationName::ScrollToRealTime,
            Self::ScrollToDataIndex { .. } => OperationName::ScrollToDataIndex,
            Self::ScrollToTimestamp { .. } => OperationName::ScrollToTimestamp,
            Self::ZoomAtCoordinate { .. } => OperationName::ZoomAtCoordinate,
            Self::ZoomAtDataIndex { .. } => OperationName::ZoomAtDataIndex,
            Self::ZoomAtTimestamp { .. } => OperationName::ZoomAtTimestamp,
            Self::Resize {} => OperationName::Resize,
            Self::RemoveIndicator { .. } => OperationName::RemoveIndicator,
        }
    }

    /// The "remove all" form of the remove operation.
    #[must_use]
    pub fn remove_all_indicators() -> Self {
        Self::RemoveIndicator { filter: None }
    }

    pub fn to_envelope(&self) -> BridgeResult<Envelope> {
        let value = serde_json::to_value(self)
            .map_err(|e| BridgeError::codec("failed to serialize operation", e))?;
        serde_json::from_value(value)
            .map_err(|e| BridgeError::codec("operation did not produce an envelope", e))
    }

    /// Reads the typed call back out of an envelope, as the remote dispatcher would.
    pub fn from_envelope(envelope: &Envelope) -> BridgeResult<Self> {
        let value = serde_json::to_value(envelope)
            .map_err(|e| BridgeError::codec("failed to serialize envelope", e))?;
        serde_json::from_value(value).map_err(|e| {
            BridgeError::codec(
                &format!("envelope params do not match `{}`", envelope.function),
                e,
            )
        })
    }
}
