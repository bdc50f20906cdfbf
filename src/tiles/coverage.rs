//! Which tiles a viewport needs.
//!
//! Mirrors the engine's own tile selection: project the view center to
//! world pixels, take the pixel rectangle of the viewport around it, and
//! convert that rectangle to a tile range. Rows outside the grid are dropped,
//! columns wrap around the antimeridian.

use crate::core::{
    constants::TILE_SIZE,
    geo::{world_pixel, LatLng, Point, TileCoord},
};

/// A tile and where its top-left corner lands in the viewport raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub coord: TileCoord,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Inclusive range of unwrapped tile indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl TileRange {
    pub fn columns(&self) -> u64 {
        (self.max_x - self.min_x + 1).max(0) as u64
    }

    pub fn rows(&self) -> u64 {
        (self.max_y - self.min_y + 1).max(0) as u64
    }
}

/// World-pixel rectangle `(top_left, bottom_right)` of a viewport centered on `center`.
pub fn pixel_bounds(center: &LatLng, zoom: u8, width: u32, height: u32) -> (Point, Point) {
    let pixel_center = world_pixel(zoom, center);
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    (
        Point::new(pixel_center.x - half_w, pixel_center.y - half_h),
        Point::new(pixel_center.x + half_w, pixel_center.y + half_h),
    )
}

/// Converts pixel bounds to the tiles they touch. A tile merely sharing an
/// edge with the rectangle is not included.
pub fn pixel_bounds_to_tile_range(bounds: &(Point, Point)) -> TileRange {
    let tile_size = TILE_SIZE as f64;
    TileRange {
        min_x: (bounds.0.x / tile_size).floor() as i64,
        min_y: (bounds.0.y / tile_size).floor() as i64,
        max_x: (bounds.1.x / tile_size).ceil() as i64 - 1,
        max_y: (bounds.1.y / tile_size).ceil() as i64 - 1,
    }
}

/// Tiles needed to fill a `width` x `height` pixel viewport, in row-major order.
pub fn tiles_covering(center: &LatLng, zoom: u8, width: u32, height: u32) -> Vec<TilePlacement> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let bounds = pixel_bounds(center, zoom, width, height);
    let grid = TileCoord::grid_size(zoom) as i64;
    let tile_size = TILE_SIZE as f64;

    // Rows outside the grid are never drawn
    let mut range = pixel_bounds_to_tile_range(&bounds);
    range.min_y = range.min_y.max(0);
    range.max_y = range.max_y.min(grid - 1);

    let mut placements = Vec::with_capacity((range.columns() * range.rows()) as usize);
    for y in range.min_y..=range.max_y {
        let offset_y = (y as f64 * tile_size - bounds.0.y).floor() as i64;

        for x in range.min_x..=range.max_x {
            let wrapped_x = x.rem_euclid(grid);
            placements.push(TilePlacement {
                coord: TileCoord::new(wrapped_x as u32, y as u32, zoom),
                offset_x: (x as f64 * tile_size - bounds.0.x).floor() as i64,
                offset_y,
            });
        }
    }
    placements
}
