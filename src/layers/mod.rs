//! Tile layer specifications and the paint-order stack they are attached to.

pub mod manager;
pub mod tile;

pub use manager::{AttachedLayer, LayerId, LayerManager};
pub use tile::{Opacity, Subdomains, TileLayerSpec};
