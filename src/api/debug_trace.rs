use tracing::debug;

/// Debug trace fed by every bridge action.
///
/// Messages always go to `tracing` at debug level. When the debug toggle is on
/// the trace also keeps a counter and the latest message, which is what a host
/// debug overlay displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugTrace {
    enabled: bool,
    count: u64,
    last_message: Option<String>,
}

impl DebugTrace {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(trace = %message, "bridge trace");
        if self.enabled {
            self.count += 1;
            self.last_message = Some(message);
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}
