use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::protocol::{InboundMessage, OperationName};

/// Bootstrap state of the remote engine for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Bootstrapping,
    Ready,
}

/// Session lifecycle: `Bootstrapping` → `Ready`, once per session.
///
/// A session is one lifetime of a rendering-surface instance. Only tearing the
/// surface down and recreating it (`begin_new_session`) goes back to
/// `Bootstrapping`.
#[derive(Debug, Clone, Default)]
pub struct SessionLifecycle {
    state: SessionState,
    session_id: u64,
}

impl SessionLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Only `init` may cross the channel before the engine reported readiness.
    #[must_use]
    pub fn permits(&self, operation: OperationName) -> bool {
        operation == OperationName::Init || self.is_ready()
    }

    /// Applies an inbound notification. Returns `true` only for the transition
    /// into `Ready`; repeated `inited` messages are ignored.
    pub fn apply(&mut self, message: InboundMessage) -> bool {
        match (message, self.state) {
            (InboundMessage::Inited, SessionState::Bootstrapping) => {
                self.state = SessionState::Ready;
                info!(session_id = self.session_id, "remote engine initialized");
                true
            }
            (InboundMessage::Inited, SessionState::Ready) => {
                debug!(
                    session_id = self.session_id,
                    "ignoring repeated inited notification"
                );
                false
            }
        }
    }

    /// Starts a fresh session for a recreated surface and returns its id.
    pub fn begin_new_session(&mut self) -> u64 {
        self.session_id += 1;
        self.state = SessionState::Bootstrapping;
        info!(session_id = self.session_id, "rendering surface session started");
        self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionLifecycle, SessionState};
    use crate::protocol::{InboundMessage, OperationName};

    #[test]
    fn inited_transitions_once() {
        let mut session = SessionLifecycle::new();
        assert_eq!(session.state(), SessionState::Bootstrapping);

        assert!(session.apply(InboundMessage::Inited));
        assert!(!session.apply(InboundMessage::Inited));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn bootstrapping_only_permits_init() {
        let session = SessionLifecycle::new();
        for name in OperationName::ALL {
            assert_eq!(session.permits(name), name == OperationName::Init);
        }
    }

    #[test]
    fn new_session_returns_to_bootstrapping() {
        let mut session = SessionLifecycle::new();
        session.apply(InboundMessage::Inited);

        let id = session.begin_new_session();
        assert_eq!(id, 1);
        assert_eq!(session.state(), SessionState::Bootstrapping);
        assert!(!session.permits(OperationName::Resize));
    }
}
