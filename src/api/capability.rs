use serde_json::Value;

use crate::core::{
    ApplyDataMore, ChartOptions, Coordinate, IndicatorFilter, IndicatorValue, KLineData,
    PaneOptions, Precision,
};
use crate::error::BridgeResult;
use crate::protocol::ChartOperation;

/// Typed handle handed to collaborators: one method per registry entry.
///
/// Implementors only provide [`ChartCapabilities::invoke`]; every other method
/// builds the matching [`ChartOperation`]. Durations are milliseconds.
pub trait ChartCapabilities {
    fn invoke(&mut self, operation: ChartOperation) -> BridgeResult<()>;

    fn init(&mut self, options: ChartOptions) -> BridgeResult<()> {
        self.invoke(ChartOperation::Init { options })
    }

    fn set_precision(&mut self, precision: Precision) -> BridgeResult<()> {
        self.invoke(ChartOperation::SetPrecision { precision })
    }

    fn set_styles(&mut self, value: Value) -> BridgeResult<()> {
        self.invoke(ChartOperation::SetStyles { value })
    }

    /// Streams a single bar (append or replace the last one).
    fn update_data(&mut self, data: KLineData) -> BridgeResult<()> {
        self.invoke(ChartOperation::UpdateData { data })
    }

    fn apply_new_data(
        &mut self,
        data_list: Vec<KLineData>,
        more: Option<ApplyDataMore>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ApplyNewData {
            data_list,
            more: more.unwrap_or_default(),
        })
    }

    fn create_indicator(
        &mut self,
        value: IndicatorValue,
        is_stack: Option<bool>,
        pane_options: Option<PaneOptions>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::CreateIndicator {
            value,
            is_stack: is_stack.unwrap_or(false),
            pane_options,
        })
    }

    /// `None` removes every indicator.
    fn remove_indicator(&mut self, filter: Option<IndicatorFilter>) -> BridgeResult<()> {
        self.invoke(ChartOperation::RemoveIndicator { filter })
    }

    fn scroll_by_distance(
        &mut self,
        distance: f64,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ScrollByDistance {
            distance,
            animation_duration,
        })
    }

    fn scroll_to_real_time(&mut self, animation_duration: Option<u64>) -> BridgeResult<()> {
        self.invoke(ChartOperation::ScrollToRealTime { animation_duration })
    }

    fn scroll_to_data_index(
        &mut self,
        data_index: usize,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ScrollToDataIndex {
            data_index,
            animation_duration,
        })
    }

    fn scroll_to_timestamp(
        &mut self,
        timestamp: i64,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ScrollToTimestamp {
            timestamp,
            animation_duration,
        })
    }

    fn zoom_at_coordinate(
        &mut self,
        scale: f64,
        coordinate: Option<Coordinate>,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ZoomAtCoordinate {
            scale,
            coordinate,
            animation_duration,
        })
    }

    fn zoom_at_data_index(
        &mut self,
        scale: f64,
        data_index: usize,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ZoomAtDataIndex {
            scale,
            data_index,
            animation_duration,
        })
    }

    fn zoom_at_timestamp(
        &mut self,
        scale: f64,
        timestamp: i64,
        animation_duration: Option<u64>,
    ) -> BridgeResult<()> {
        self.invoke(ChartOperation::ZoomAtTimestamp {
            scale,
            timestamp,
            animation_duration,
        })
    }

    fn resize(&mut self) -> BridgeResult<()> {
        self.invoke(ChartOperation::Resize {})
    }
}
