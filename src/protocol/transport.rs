use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use crate::error::{BridgeError, BridgeResult};

use super::{Envelope, OperationName, decode_envelope};

/// Outbound half of the message channel (host → rendering surface).
///
/// Sends are fire-and-forget: `Ok` means the message was handed to the
/// surface, not that it was delivered or executed. Implementations must not
/// block. A surface that has not finished loading drops messages silently.
/// `Err` is reserved for a surface that reported a load/execute fault.
pub trait OutboundTransport {
    fn post_message(&mut self, message: &str) -> BridgeResult<()>;
}

impl<T: OutboundTransport + ?Sized> OutboundTransport for Box<T> {
    fn post_message(&mut self, message: &str) -> BridgeResult<()> {
        (**self).post_message(message)
    }
}

impl<T: OutboundTransport + ?Sized> OutboundTransport for &mut T {
    fn post_message(&mut self, message: &str) -> BridgeResult<()> {
        (**self).post_message(message)
    }
}

/// Creates the inbound half (rendering surface → host).
///
/// The sender goes to whatever callback the web view exposes for posted
/// messages; the receiver is owned by the bridge and drained on its thread.
#[must_use]
pub fn inbound_channel() -> (InboundSender, InboundReceiver) {
    let (tx, rx) = mpsc::channel();
    (InboundSender { tx }, InboundReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct InboundSender {
    tx: mpsc::Sender<String>,
}

impl InboundSender {
    /// Queues a raw message. Returns `false` once the bridge is gone.
    pub fn deliver(&self, raw: impl Into<String>) -> bool {
        self.tx.send(raw.into()).is_ok()
    }
}

#[derive(Debug)]
pub struct InboundReceiver {
    rx: mpsc::Receiver<String>,
}

impl InboundReceiver {
    /// Takes every queued message in arrival order without waiting.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.rx.try_iter().collect()
    }
}

#[derive(Debug)]
struct RecordingState {
    loaded: bool,
    fault: Option<String>,
    delivered: Vec<String>,
    dropped: usize,
}

/// In-memory surface stand-in that records every delivered message.
///
/// Clones share state, so a test can keep a handle while the bridge owns
/// another one.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    state: Rc<RefCell<RecordingState>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    /// A surface that has finished loading.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(RecordingState {
                loaded: true,
                fault: None,
                delivered: Vec::new(),
                dropped: 0,
            })),
        }
    }

    /// A surface still loading: every message is lost until `set_loaded(true)`.
    #[must_use]
    pub fn unloaded() -> Self {
        let transport = Self::new();
        transport.set_loaded(false);
        transport
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.state.borrow_mut().loaded = loaded;
    }

    /// Makes every following send fail with a transport fault.
    pub fn fail_with(&self, detail: impl Into<String>) {
        self.state.borrow_mut().fault = Some(detail.into());
    }

    pub fn clear_fault(&self) {
        self.state.borrow_mut().fault = None;
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.state.borrow().delivered.clone()
    }

    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.state.borrow().dropped
    }

    /// Delivered messages decoded the way the remote dispatcher decodes them.
    pub fn envelopes(&self) -> BridgeResult<Vec<Envelope>> {
        self.state
            .borrow()
            .delivered
            .iter()
            .map(|message| decode_envelope(message))
            .collect()
    }

    /// Operation names of delivered messages; undecodable ones are skipped.
    #[must_use]
    pub fn function_names(&self) -> Vec<OperationName> {
        self.state
            .borrow()
            .delivered
            .iter()
            .filter_map(|message| decode_envelope(message).ok())
            .map(|envelope| envelope.function)
            .collect()
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.delivered.clear();
        state.dropped = 0;
    }
}

impl OutboundTransport for RecordingTransport {
    fn post_message(&mut self, message: &str) -> BridgeResult<()> {
        let mut state = self.state.borrow_mut();
        if let Some(detail) = &state.fault {
            return Err(BridgeError::Transport(detail.clone()));
        }
        if !state.loaded {
            state.dropped += 1;
            return Ok(());
        }
        state.delivered.push(message.to_owned());
        Ok(())
    }
}
