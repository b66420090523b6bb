//! Telemetry helpers for hosts embedding `kline-bridge`.
//!
//! The bridge only emits `tracing` events (dispatched operations, session
//! transitions, surface faults). Hosts either call `init_default_tracing` or
//! install their own subscriber and filters.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// With `debug` set the default filter is `kline_bridge=debug,info`, which makes
/// every dispatched operation visible. `RUST_LOG` still wins when present.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing(debug: bool) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let fallback = if debug {
            "kline_bridge=debug,info"
        } else {
            "info"
        };
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = debug;
        false
    }
}
