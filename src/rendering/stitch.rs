//! Stitch tiles into viewport rasters and merge layers in paint order.
//!
//! Each layer is drawn into its own transparent raster, its alpha is scaled
//! by the layer opacity, and the rasters are composited bottom to top with
//! source-over blending.

use futures::future::join_all;
use image::{imageops, ImageFormat, RgbaImage};
use std::path::Path;

use crate::{
    core::{geo::LatLng, view::ViewHandle},
    prelude::HashMap,
    tiles::{coverage::tiles_covering, loader::TileFetcher, source::TileSource},
    Result,
};

/// Draws the tiles of `source` covering a `width` x `height` viewport.
///
/// Every distinct tile URL is requested once, all requests in flight
/// together. Missing tiles stay transparent; a source that does not cover
/// `zoom` yields a fully transparent raster without any request.
pub async fn stitch_layer<F, S>(
    fetcher: &F,
    source: &S,
    center: &LatLng,
    zoom: u8,
    width: u32,
    height: u32,
) -> Result<RgbaImage>
where
    F: TileFetcher + ?Sized,
    S: TileSource + ?Sized,
{
    let mut canvas = RgbaImage::new(width, height);
    if !source.covers_zoom(zoom) {
        log::debug!("zoom {} is above layer max zoom {}, skipping", zoom, source.max_zoom());
        return Ok(canvas);
    }

    let placements = tiles_covering(center, zoom, width, height);

    // Wrapped columns can place the same tile more than once
    let mut urls: Vec<String> = Vec::new();
    let mut url_index: HashMap<String, usize> = HashMap::default();
    let slots: Vec<usize> = placements
        .iter()
        .map(|placement| {
            let url = source.url(placement.coord);
            *url_index.entry(url.clone()).or_insert_with(|| {
                urls.push(url);
                urls.len() - 1
            })
        })
        .collect();

    let responses = join_all(urls.iter().map(|url| fetcher.fetch(url))).await;
    let mut tiles = Vec::with_capacity(responses.len());
    for (url, response) in urls.iter().zip(responses) {
        let tile = match response? {
            Some(bytes) => Some(image::load_from_memory(&bytes)?.to_rgba8()),
            None => {
                log::debug!("{} has no tile, leaving it blank", url);
                None
            }
        };
        tiles.push(tile);
    }

    for (placement, slot) in placements.iter().zip(slots) {
        if let Some(tile) = &tiles[slot] {
            imageops::replace(&mut canvas, tile, placement.offset_x, placement.offset_y);
        }
    }
    Ok(canvas)
}

/// Scales the alpha channel by `opacity`.
pub fn apply_opacity(image: &mut RgbaImage, opacity: f64) {
    if opacity >= 1.0 {
        return;
    }
    let opacity = opacity.max(0.0);
    for pixel in image.pixels_mut() {
        pixel[3] = (pixel[3] as f64 * opacity).round() as u8;
    }
}

/// Composites every layer of `view` into one `width` x `height` raster.
pub async fn render_view<F>(fetcher: &F, view: &ViewHandle, width: u32, height: u32) -> Result<RgbaImage>
where
    F: TileFetcher + ?Sized,
{
    let center = view.center();
    let mut composite = RgbaImage::new(width, height);

    for layer in view.layers() {
        let mut raster =
            stitch_layer(fetcher, &layer.spec, &center, view.zoom(), width, height).await?;
        apply_opacity(&mut raster, layer.spec.effective_opacity());
        imageops::overlay(&mut composite, &raster, 0, 0);
        log::info!("composited {} ({})", layer.id, layer.spec.url_template());
    }
    Ok(composite)
}

/// Writes `image` as PNG.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
