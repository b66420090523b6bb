use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{BridgeError, BridgeResult};

/// Retrieves the engine bundle text for a source location.
pub trait BundleFetcher {
    fn fetch(&self, source: &str) -> BridgeResult<String>;
}

impl<F: BundleFetcher + ?Sized> BundleFetcher for &F {
    fn fetch(&self, source: &str) -> BridgeResult<String> {
        (**self).fetch(source)
    }
}

/// Serves bundles from memory and counts fetch attempts.
///
/// Used for offline hosts that ship the bundle themselves and by tests that
/// check how often the network would have been hit.
#[derive(Debug, Default)]
pub struct StaticBundleFetcher {
    bundles: HashMap<String, String>,
    attempts: Cell<usize>,
}

impl StaticBundleFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bundle(mut self, source: impl Into<String>, bundle: impl Into<String>) -> Self {
        self.bundles.insert(source.into(), bundle.into());
        self
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl BundleFetcher for StaticBundleFetcher {
    fn fetch(&self, source: &str) -> BridgeResult<String> {
        self.attempts.set(self.attempts.get() + 1);
        self.bundles
            .get(source)
            .cloned()
            .ok_or_else(|| BridgeError::Fetch {
                source_url: source.to_owned(),
                reason: "no bundle registered for this source".to_owned(),
            })
    }
}

/// Blocking HTTP fetcher.
#[cfg(feature = "http-fetch")]
#[derive(Debug, Clone)]
pub struct HttpBundleFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http-fetch")]
impl HttpBundleFetcher {
    pub fn new() -> BridgeResult<Self> {
        Self::with_timeout(std::time::Duration::from_secs(12))
    }

    pub fn with_timeout(timeout: std::time::Duration) -> BridgeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BridgeError::Fetch {
                source_url: String::new(),
                reason: format!("http client error: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http-fetch")]
impl BundleFetcher for HttpBundleFetcher {
    fn fetch(&self, source: &str) -> BridgeResult<String> {
        let fetch_error = |reason: String| BridgeError::Fetch {
            source_url: source.to_owned(),
            reason,
        };
        self.client
            .get(source)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| fetch_error(format!("request error: {e}")))?
            .text()
            .map_err(|e| fetch_error(format!("body decode error: {e}")))
    }
}
