use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Memo of fetched engine bundles keyed by source location.
///
/// Entries are populated on first miss and never replaced or invalidated.
pub trait BundleCache {
    fn get(&self, source: &str) -> Option<Arc<str>>;

    /// Stores `bundle` unless an entry exists; returns the entry now cached.
    fn insert(&self, source: &str, bundle: Arc<str>) -> Arc<str>;
}

impl<C: BundleCache + ?Sized> BundleCache for &C {
    fn get(&self, source: &str) -> Option<Arc<str>> {
        (**self).get(source)
    }

    fn insert(&self, source: &str, bundle: Arc<str>) -> Arc<str> {
        (**self).insert(source, bundle)
    }
}

/// Per-instance cache, handy for tests that pre-seed or isolate bundles.
#[derive(Debug, Default)]
pub struct MemoryBundleCache {
    entries: RefCell<HashMap<String, Arc<str>>>,
}

impl MemoryBundleCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seeded(source: impl Into<String>, bundle: impl Into<Arc<str>>) -> Self {
        let cache = Self::new();
        cache
            .entries
            .borrow_mut()
            .insert(source.into(), bundle.into());
        cache
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BundleCache for MemoryBundleCache {
    fn get(&self, source: &str) -> Option<Arc<str>> {
        self.entries.borrow().get(source).cloned()
    }

    fn insert(&self, source: &str, bundle: Arc<str>) -> Arc<str> {
        self.entries
            .borrow_mut()
            .entry(source.to_owned())
            .or_insert(bundle)
            .clone()
    }
}

fn process_entries() -> &'static RwLock<HashMap<String, Arc<str>>> {
    static ENTRIES: OnceLock<RwLock<HashMap<String, Arc<str>>>> = OnceLock::new();
    ENTRIES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Process-wide cache shared by every assembler using it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBundleCache;

impl BundleCache for ProcessBundleCache {
    fn get(&self, source: &str) -> Option<Arc<str>> {
        process_entries()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned()
    }

    fn insert(&self, source: &str, bundle: Arc<str>) -> Arc<str> {
        process_entries()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(source.to_owned())
            .or_insert(bundle)
            .clone()
    }
}
