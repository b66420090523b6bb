use serde::{Deserialize, Serialize};

use crate::protocol::OperationName;

/// Lifecycle and dispatch events exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BridgeEvent {
    SurfaceLoaded { session_id: u64 },
    Inited { session_id: u64 },
    OperationSent { name: OperationName },
    OperationDropped { name: OperationName },
    TransportFault { detail: String },
    SessionReset { session_id: u64 },
}

/// Hook interface for the collaborator that owns the host widget.
///
/// Observers react to session readiness (for example to start an entrance
/// transition) and to surface faults (for example to remount the view). They
/// cannot reach into bridge internals.
pub trait BridgeObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &BridgeEvent);
}

/// Observer backed by a closure.
pub struct FnObserver<F: FnMut(&BridgeEvent)> {
    id: String,
    callback: F,
}

impl<F: FnMut(&BridgeEvent)> FnObserver<F> {
    #[must_use]
    pub fn new(id: impl Into<String>, callback: F) -> Self {
        Self {
            id: id.into(),
            callback,
        }
    }
}

impl<F: FnMut(&BridgeEvent)> BridgeObserver for FnObserver<F> {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &BridgeEvent) {
        (self.callback)(event);
    }
}
