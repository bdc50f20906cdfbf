//! # tilestack
//!
//! Typed map-view bootstrap for Leaflet-style tile maps.
//!
//! A view is built from a center and a zoom level, then tile layers are
//! attached in paint order: the first layer is the basemap, every later
//! layer is drawn on top of the ones before it. A configured view can be
//! handed to a consumer: the Leaflet emitter writes the browser bootstrap
//! script, and (with the `render` feature) the compositor fetches the tiles
//! covering the view and merges the layers into a single raster.

pub mod core;
pub mod export;
pub mod layers;
pub mod prelude;
#[cfg(feature = "render")]
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::ViewBuilder,
    config::{BootstrapConfig, ViewConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    view::{attach_tile_layer, initialize_view, ViewHandle},
};

pub use layers::{
    manager::{AttachedLayer, LayerId, LayerManager},
    tile::{Opacity, Subdomains, TileLayerSpec},
};

pub use tiles::{
    coverage::{tiles_covering, TilePlacement},
    source::TileSource,
    template::UrlTemplate,
};

pub use export::leaflet::{LeafletPage, LeafletScript};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom level {zoom}: must be between 0 and {max}")]
    InvalidZoom { zoom: i64, max: u8 },

    #[error("Invalid tile URL template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Invalid opacity {0}: must be between 0 and 1")]
    InvalidOpacity(f64),

    #[error("Config error: {0}")]
    Config(String),

    #[cfg(feature = "render")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[cfg(feature = "render")]
    #[error("Tile request to {url} failed with HTTP {status}")]
    TileStatus { url: String, status: u16 },

    #[cfg(feature = "render")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Error type alias for convenience
pub type Error = MapError;
