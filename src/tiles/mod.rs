pub mod coverage;
#[cfg(feature = "render")]
pub mod loader;
pub mod source;
pub mod template;

// Re-exports for convenience
pub use coverage::{tiles_covering, TilePlacement, TileRange};
#[cfg(feature = "render")]
pub use loader::{HttpTileFetcher, MemoryTileFetcher, TileFetcher};
pub use source::TileSource;
pub use template::UrlTemplate;
