//! Prelude module for common tilestack types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tilestack::prelude::*;`

pub use crate::core::{
    builder::ViewBuilder,
    config::{BootstrapConfig, ViewConfig},
    constants::{ENGINE_DEFAULT_MAX_ZOOM, ENGINE_DEFAULT_OPACITY, TILE_SIZE},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    view::{attach_tile_layer, initialize_view, ViewHandle},
};

pub use crate::layers::{
    manager::{AttachedLayer, LayerId, LayerManager},
    tile::{Opacity, Subdomains, TileLayerSpec},
};

pub use crate::tiles::{
    coverage::{tiles_covering, TilePlacement},
    source::TileSource,
    template::UrlTemplate,
};

pub use crate::export::leaflet::{LeafletPage, LeafletScript};

#[cfg(feature = "render")]
pub use crate::rendering::stitch::{render_view, stitch_layer};

#[cfg(feature = "render")]
pub use crate::tiles::loader::{HttpTileFetcher, MemoryTileFetcher, TileFetcher};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
