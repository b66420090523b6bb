use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{BridgeError, BridgeResult};

use super::OperationName;

/// Literal posted by the remote side once the engine instance exists.
pub const INITED_SENTINEL: &str = "inited";

/// One remote invocation on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub function: OperationName,
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl Envelope {
    #[must_use]
    pub fn new(function: OperationName, params: Value) -> Self {
        Self { function, params }
    }
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

/// Host-bound notifications understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundMessage {
    Inited,
}

pub fn encode_envelope(envelope: &Envelope) -> BridgeResult<String> {
    serde_json::to_string(envelope).map_err(|e| BridgeError::codec("failed to encode envelope", e))
}

/// Remote-side decode: what the dispatcher sees after `JSON.parse`.
pub fn decode_envelope(message: &str) -> BridgeResult<Envelope> {
    serde_json::from_str(message).map_err(|e| BridgeError::codec("failed to decode envelope", e))
}

/// Decodes a raw inbound string.
///
/// Only the bootstrap sentinel is recognized, either bare or as a JSON string
/// literal. Everything else is dropped without error.
#[must_use]
pub fn decode_inbound(raw: &str) -> Option<InboundMessage> {
    let trimmed = raw.trim();
    if trimmed == INITED_SENTINEL {
        return Some(InboundMessage::Inited);
    }
    if let Ok(Value::String(text)) = serde_json::from_str::<Value>(trimmed) {
        if text == INITED_SENTINEL {
            return Some(InboundMessage::Inited);
        }
    }
    trace!(message = raw, "ignoring unrecognized inbound message");
    None
}
