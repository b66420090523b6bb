//! Remote-invocation protocol between the host and the rendering surface.

pub mod codec;
pub mod registry;
pub mod transport;

pub use codec::{
    Envelope, INITED_SENTINEL, InboundMessage, decode_envelope, decode_inbound, encode_envelope,
};
pub use registry::{ChartOperation, OperationName, dispatch_script};
pub use transport::{
    InboundReceiver, InboundSender, OutboundTransport, RecordingTransport, inbound_channel,
};
