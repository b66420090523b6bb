use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::core::{ApplyDataMore, ChartOptions, IndicatorSpec, KLineData, Precision};
use crate::error::{BridgeError, BridgeResult};
use crate::protocol::ChartOperation;

use super::SessionState;

/// Host-state slots whose changes are mirrored to the remote engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WatchedSlot {
    Styles,
    Precision,
    DataList,
    Indicators,
}

impl WatchedSlot {
    /// Evaluation order of one observation cycle.
    pub const ALL: [Self; 4] = [
        Self::Styles,
        Self::Precision,
        Self::DataList,
        Self::Indicators,
    ];
}

/// Last dispatched snapshot per slot.
///
/// Snapshots are canonical `serde_json::Value` trees. Object equality does not
/// depend on key order, so reordered keys never count as a change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotMemo {
    entries: IndexMap<WatchedSlot, Value>,
}

impl SnapshotMemo {
    #[must_use]
    pub fn get(&self, slot: WatchedSlot) -> Option<&Value> {
        self.entries.get(&slot)
    }

    #[must_use]
    pub fn matches(&self, slot: WatchedSlot, snapshot: &Value) -> bool {
        self.entries.get(&slot) == Some(snapshot)
    }

    pub fn record(&mut self, slot: WatchedSlot, snapshot: Value) {
        self.entries.insert(slot, snapshot);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Host-side values the bridge keeps in sync with the remote engine.
///
/// `None` means "not provided": the slot is skipped, not cleared remotely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostState {
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(default)]
    pub precision: Option<Precision>,
    #[serde(default)]
    pub data_list: Option<Vec<KLineData>>,
    #[serde(default)]
    pub data_more: Option<ApplyDataMore>,
    #[serde(default)]
    pub indicators: Option<Vec<IndicatorSpec>>,
}

impl HostState {
    #[must_use]
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
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
    pub fn with_data_more(mut self, more: ApplyDataMore) -> Self {
        self.data_more = Some(more);
        self
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: Vec<IndicatorSpec>) -> Self {
        self.indicators = Some(indicators);
        self
    }
}

/// Operations owed to the remote engine for one changed slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub slot: WatchedSlot,
    pub snapshot: Value,
    pub operations: SmallVec<[ChartOperation; 2]>,
}

/// Decides which remote operations an observation cycle must send.
///
/// Planning is pure; the caller dispatches the planned operations and only
/// then commits the snapshot, so a slot is memoized iff it was sent.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    memo: SnapshotMemo,
}

impl ChangeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn memo(&self) -> &SnapshotMemo {
        &self.memo
    }

    pub fn plan(&self, state: &HostState, session: SessionState) -> BridgeResult<Vec<SlotUpdate>> {
        if session != SessionState::Ready {
            return Ok(Vec::new());
        }

        let mut updates = Vec::new();
        for slot in WatchedSlot::ALL {
            let Some(snapshot) = slot_snapshot(state, slot)? else {
                continue;
            };
            if self.memo.matches(slot, &snapshot) {
                continue;
            }
            updates.push(SlotUpdate {
                slot,
                operations: slot_operations(state, slot),
                snapshot,
            });
        }
        Ok(updates)
    }

    pub fn commit(&mut self, update: SlotUpdate) {
        self.memo.record(update.slot, update.snapshot);
    }

    /// Forgets every snapshot; the next ready cycle resends all present slots.
    pub fn reset(&mut self) {
        self.memo.clear();
    }
}

fn slot_snapshot(state: &HostState, slot: WatchedSlot) -> BridgeResult<Option<Value>> {
    let snapshot = match slot {
        WatchedSlot::Styles => state.options.styles.clone(),
        WatchedSlot::Precision => state.precision.as_ref().map(canonical).transpose()?,
        WatchedSlot::DataList => state.data_list.as_ref().map(canonical).transpose()?,
        WatchedSlot::Indicators => state.indicators.as_ref().map(canonical).transpose()?,
    };
    Ok(snapshot)
}

fn canonical<T: Serialize>(value: &T) -> BridgeResult<Value> {
    serde_json::to_value(value).map_err(|e| BridgeError::codec("failed to snapshot host state", e))
}

// Only called for slots whose snapshot was present.
fn slot_operations(state: &HostState, slot: WatchedSlot) -> SmallVec<[ChartOperation; 2]> {
    let mut operations = SmallVec::new();
    match slot {
        WatchedSlot::Styles => {
            if let Some(value) = &state.options.styles {
                operations.push(ChartOperation::SetStyles {
                    value: value.clone(),
                });
            }
        }
        WatchedSlot::Precision => {
            if let Some(precision) = state.precision {
                operations.push(ChartOperation::SetPrecision { precision });
            }
        }
        WatchedSlot::DataList => {
            if let Some(data_list) = &state.data_list {
                operations.push(ChartOperation::ApplyNewData {
                    data_list: data_list.clone(),
                    more: state.data_more.unwrap_or_default(),
                });
            }
        }
        WatchedSlot::Indicators => {
            if let Some(indicators) = &state.indicators {
                // Full replace: creation order drives remote z-order.
                operations.push(ChartOperation::remove_all_indicators());
                operations.extend(indicators.iter().map(|spec| {
                    ChartOperation::CreateIndicator {
                        value: spec.value.clone(),
                        is_stack: spec.is_stack.unwrap_or(false),
                        pane_options: spec.pane_options.clone(),
                    }
                }));
            }
        }
    }
    operations
}
