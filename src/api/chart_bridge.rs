use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::extensions::{BridgeEvent, BridgeObserver};
use crate::protocol::{
    ChartOperation, InboundReceiver, InboundSender, OutboundTransport, decode_inbound,
    encode_envelope, inbound_channel,
};

use super::{
    BridgeConfig, ChangeDetector, ChartCapabilities, DebugTrace, HostState, SessionLifecycle,
    SessionState, SnapshotMemo,
};

/// Main orchestration facade owned by the host widget.
///
/// `ChartBridge` gates outbound operations on the session lifecycle, mirrors
/// watched host state through the change detector and drains inbound
/// notifications. Everything runs on the host's single UI thread.
pub struct ChartBridge<T: OutboundTransport> {
    transport: T,
    inbound_tx: InboundSender,
    inbound_rx: InboundReceiver,
    session: SessionLifecycle,
    detector: ChangeDetector,
    state: HostState,
    observers: Vec<Box<dyn BridgeObserver>>,
    trace: DebugTrace,
    fade_in: Option<Duration>,
}

impl<T: OutboundTransport> ChartBridge<T> {
    #[must_use]
    pub fn new(transport: T, config: &BridgeConfig) -> Self {
        let (inbound_tx, inbound_rx) = inbound_channel();
        Self {
            transport,
            inbound_tx,
            inbound_rx,
            session: SessionLifecycle::new(),
            detector: ChangeDetector::new(),
            state: config.host_state(),
            observers: Vec::new(),
            trace: DebugTrace::new(config.debug),
            fade_in: config.fade_in_duration(),
        }
    }

    /// Sender to wire into the surface's message callback.
    #[must_use]
    pub fn inbound_sender(&self) -> InboundSender {
        self.inbound_tx.clone()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session.session_id()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    #[must_use]
    pub fn host_state(&self) -> &HostState {
        &self.state
    }

    #[must_use]
    pub fn snapshot_memo(&self) -> &SnapshotMemo {
        self.detector.memo()
    }

    #[must_use]
    pub fn debug_trace(&self) -> &DebugTrace {
        &self.trace
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.trace.set_enabled(enabled);
    }

    /// Entrance transition the presentation layer should run, once ready.
    #[must_use]
    pub fn entrance_transition(&self) -> Option<Duration> {
        if self.is_ready() { self.fade_in } else { None }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// The surface finished loading the bootstrap document: create the engine.
    pub fn on_surface_loaded(&mut self) -> BridgeResult<()> {
        self.trace.record("surface loaded");
        let session_id = self.session.session_id();
        self.emit(&BridgeEvent::SurfaceLoaded { session_id });
        let options = self.state.options.clone();
        self.dispatch(&ChartOperation::Init { options })
    }

    /// The surface failed to load or execute. Reported, never retried.
    pub fn on_surface_error(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        warn!(detail = %detail, "rendering surface fault");
        self.trace.record(format!("surface error: {detail}"));
        self.emit(&BridgeEvent::TransportFault { detail });
    }

    /// Drains inbound notifications. Returns `true` when the session became ready.
    ///
    /// On that transition observers get `Inited` once and the first observation
    /// cycle runs against the current host state.
    pub fn pump_inbound(&mut self) -> BridgeResult<bool> {
        let mut became_ready = false;
        for raw in self.inbound_rx.drain() {
            let Some(message) = decode_inbound(&raw) else {
                continue;
            };
            if self.session.apply(message) {
                became_ready = true;
                self.trace.record("call onInited");
                let session_id = self.session.session_id();
                self.emit(&BridgeEvent::Inited { session_id });
            }
        }
        if became_ready {
            self.observe()?;
        }
        Ok(became_ready)
    }

    /// Replaces the watched host state and runs an observation cycle.
    ///
    /// Returns the number of operations sent.
    pub fn update_host_state(&mut self, state: HostState) -> BridgeResult<usize> {
        self.state = state;
        self.observe()
    }

    /// One observation cycle: sends the operations of every changed slot.
    ///
    /// A slot's snapshot is committed only after all its operations were handed
    /// to the transport; a fault stops the cycle and leaves the slot dirty.
    pub fn observe(&mut self) -> BridgeResult<usize> {
        let updates = self.detector.plan(&self.state, self.session.state())?;
        let mut sent = 0;
        for update in updates {
            for operation in &update.operations {
                self.dispatch(operation)?;
                sent += 1;
            }
            debug!(slot = ?update.slot, operations = update.operations.len(), "slot synced");
            self.detector.commit(update);
        }
        Ok(sent)
    }

    /// The surface was torn down and recreated: start a new session.
    ///
    /// Snapshots are forgotten because the new engine instance holds no state,
    /// and notifications still queued from the old surface are discarded.
    pub fn reload_surface(&mut self) -> u64 {
        let stale = self.inbound_rx.drain().len();
        if stale > 0 {
            debug!(stale, "discarding inbound messages from previous session");
        }
        self.detector.reset();
        let session_id = self.session.begin_new_session();
        self.trace.record("surface reloaded");
        self.emit(&BridgeEvent::SessionReset { session_id });
        session_id
    }

    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn BridgeObserver>) -> BridgeResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(BridgeError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.iter().any(|entry| entry.id() == observer_id) {
            return Err(BridgeError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn emit(&mut self, event: &BridgeEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    fn dispatch(&mut self, operation: &ChartOperation) -> BridgeResult<()> {
        let name = operation.name();
        if !self.session.permits(name) {
            debug!(operation = %name, "dropping operation before engine is ready");
            self.trace.record(format!("dropped function: {name}"));
            self.emit(&BridgeEvent::OperationDropped { name });
            return Ok(());
        }

        let message = encode_envelope(&operation.to_envelope()?)?;
        match self.transport.post_message(&message) {
            Ok(()) => {
                debug!(operation = %name, bytes = message.len(), "operation sent");
                self.trace.record(format!("calling function: {name}"));
                self.emit(&BridgeEvent::OperationSent { name });
                Ok(())
            }
            Err(err) => {
                let detail = match &err {
                    BridgeError::Transport(detail) => detail.clone(),
                    other => other.to_string(),
                };
                warn!(operation = %name, error = %err, "operation send failed");
                self.emit(&BridgeEvent::TransportFault { detail });
                Err(err)
            }
        }
    }
}

impl<T: OutboundTransport> ChartCapabilities for ChartBridge<T> {
    fn invoke(&mut self, operation: ChartOperation) -> BridgeResult<()> {
        self.dispatch(&operation)
    }
}

impl<T: OutboundTransport> std::fmt::Debug for ChartBridge<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartBridge")
            .field("session", &self.session)
            .field("memo_slots", &self.detector.memo().len())
            .field("observers", &self.observers.len())
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}
