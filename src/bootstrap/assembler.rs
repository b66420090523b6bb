use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::BridgeResult;
use crate::protocol::dispatch_script;

use super::{BootstrapDocument, BundleCache, BundleFetcher, FontFace, ProcessBundleCache};

/// Builds bootstrap documents, fetching each engine bundle at most once.
#[derive(Debug)]
pub struct BootstrapAssembler<F: BundleFetcher, C: BundleCache = ProcessBundleCache> {
    fetcher: F,
    cache: C,
}

impl<F: BundleFetcher> BootstrapAssembler<F, ProcessBundleCache> {
    /// Assembler backed by the process-wide bundle cache.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self::with_cache(fetcher, ProcessBundleCache)
    }
}

impl<F: BundleFetcher, C: BundleCache> BootstrapAssembler<F, C> {
    #[must_use]
    pub fn with_cache(fetcher: F, cache: C) -> Self {
        Self { fetcher, cache }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns the cached bundle for `source`, fetching it on first use.
    ///
    /// Fetch failures are returned as-is and leave the cache untouched.
    pub fn engine_bundle(&self, source: &str) -> BridgeResult<Arc<str>> {
        if let Some(bundle) = self.cache.get(source) {
            debug!(source, "engine bundle served from cache");
            return Ok(bundle);
        }

        let bundle = self.fetcher.fetch(source).inspect_err(|err| {
            warn!(source, error = %err, "engine bundle fetch failed");
        })?;
        debug!(source, bytes = bundle.len(), "engine bundle fetched");
        Ok(self.cache.insert(source, Arc::from(bundle)))
    }

    pub fn assemble(&self, source: &str, fonts: &[FontFace]) -> BridgeResult<BootstrapDocument> {
        for font in fonts {
            font.validate()?;
        }
        let engine_source = self.engine_bundle(source)?;
        Ok(BootstrapDocument::new(
            engine_source,
            dispatch_script(),
            fonts.to_vec(),
        ))
    }

    pub fn assemble_html(&self, source: &str, fonts: &[FontFace]) -> BridgeResult<String> {
        Ok(self.assemble(source, fonts)?.to_html())
    }
}
