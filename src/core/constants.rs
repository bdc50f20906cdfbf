//! Core constants derived from Leaflet defaults and common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Max zoom the engine applies to a tile layer that does not set one (Leaflet's `maxZoom`).
pub const ENGINE_DEFAULT_MAX_ZOOM: u8 = 18;

/// Opacity the engine applies to a tile layer that does not set one.
pub const ENGINE_DEFAULT_OPACITY: f64 = 1.0;

/// Highest zoom a view may be configured with; tile indices at this level still fit in `u32`.
pub const MAX_ZOOM_LEVEL: u8 = 30;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// DOM element id the map is mounted into when the config does not name one.
pub const DEFAULT_CONTAINER_ID: &str = "map";

/// Leaflet release loaded by generated pages.
pub const LEAFLET_VERSION: &str = "1.9.4";
