//! One-time bootstrap payload for the rendering surface.

pub mod assembler;
pub mod bundle_cache;
pub mod document;
pub mod fetcher;
pub mod fonts;

pub use assembler::BootstrapAssembler;
pub use bundle_cache::{BundleCache, MemoryBundleCache, ProcessBundleCache};
pub use document::{BootstrapDocument, CONTAINER_ID};
#[cfg(feature = "http-fetch")]
pub use fetcher::HttpBundleFetcher;
pub use fetcher::{BundleFetcher, StaticBundleFetcher};
pub use fonts::FontFace;
