//! Collaborator hooks around the bridge.
//!
//! Keep these decoupled from the dispatch path: observers only see events.

pub mod observers;

pub use observers::{BridgeEvent, BridgeObserver, FnObserver};
