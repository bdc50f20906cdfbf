use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Highest zoom this source is requested at.
    fn max_zoom(&self) -> u8;

    /// Whether the engine requests tiles from this source at `zoom`.
    fn covers_zoom(&self, zoom: u8) -> bool {
        zoom <= self.max_zoom()
    }
}
