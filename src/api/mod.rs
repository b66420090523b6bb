mod bridge_config;
mod capability;
mod change_detection;
mod chart_bridge;
mod debug_trace;
mod session;

pub use bridge_config::{BridgeConfig, DEFAULT_ENGINE_SOURCE_URL};
pub use capability::ChartCapabilities;
pub use change_detection::{ChangeDetector, HostState, SlotUpdate, SnapshotMemo, WatchedSlot};
pub use chart_bridge::ChartBridge;
pub use debug_trace::DebugTrace;
pub use session::{SessionLifecycle, SessionState};
