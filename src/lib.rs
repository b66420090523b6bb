//! kline-bridge: host-side bridge to a klinecharts engine in a web view.
//!
//! The engine runs inside an embedded rendering surface the host does not
//! control. This crate provides the remote-invocation protocol, the change
//! detection that keeps re-renders to a minimum, the session lifecycle and the
//! bootstrap document loaded into the surface.

pub mod api;
pub mod bootstrap;
pub mod core;
pub mod error;
pub mod extensions;
pub mod protocol;
pub mod telemetry;

pub use api::{BridgeConfig, ChartBridge, ChartCapabilities, HostState, SessionState};
pub use error::{BridgeError, BridgeResult};
