use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("rendering surface fault: {0}")]
    Transport(String),

    #[error("failed to fetch engine bundle from `{source_url}`: {reason}")]
    Fetch { source_url: String, reason: String },

    #[error("codec error: {0}")]
    Codec(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl BridgeError {
    pub(crate) fn codec(context: &str, err: serde_json::Error) -> Self {
        Self::Codec(format!("{context}: {err}"))
    }
}
