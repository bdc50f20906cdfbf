//! Compositor checks against in-memory tile servers.
#![cfg(feature = "render")]

use async_trait::async_trait;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use tilestack::{prelude::*, rendering::save_png};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid_png(color: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(256, 256, Rgba(color)))
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    bytes
}

/// One world tile per server at zoom 0.
fn world_fetcher() -> MemoryTileFetcher {
    let mut fetcher = MemoryTileFetcher::new();
    fetcher.insert("http://base.test/0/0/0.png", solid_png(RED));
    fetcher.insert("http://overlay.test/0/0/0.png", solid_png(BLUE));
    fetcher
}

fn world_view(templates: &[&str]) -> ViewHandle {
    let mut builder = ViewBuilder::new().center(0.0, 0.0).zoom(0);
    for template in templates {
        builder = builder.tile_layer(TileLayerSpec::new(template).unwrap());
    }
    builder.build().unwrap()
}

struct FailingFetcher;

#[async_trait]
impl TileFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> tilestack::Result<Option<Vec<u8>>> {
        Err(MapError::TileStatus {
            url: url.to_string(),
            status: 500,
        })
    }
}

#[tokio::test]
async fn test_later_layer_paints_on_top() {
    let fetcher = world_fetcher();

    let view = world_view(&["http://base.test/{z}/{x}/{y}.png", "http://overlay.test/{z}/{x}/{y}.png"]);
    let composite = render_view(&fetcher, &view, 256, 256).await.unwrap();
    assert_eq!(composite.get_pixel(128, 128).0, BLUE);

    let reversed = world_view(&["http://overlay.test/{z}/{x}/{y}.png", "http://base.test/{z}/{x}/{y}.png"]);
    let composite = render_view(&fetcher, &reversed, 256, 256).await.unwrap();
    assert_eq!(composite.get_pixel(128, 128).0, RED);
}

#[tokio::test]
async fn test_missing_overlay_tile_shows_base() {
    let mut fetcher = MemoryTileFetcher::new();
    fetcher.insert("http://base.test/0/0/0.png", solid_png(RED));

    let view = world_view(&["http://base.test/{z}/{x}/{y}.png", "http://overlay.test/{z}/{x}/{y}.png"]);
    let composite = render_view(&fetcher, &view, 256, 256).await.unwrap();

    assert_eq!(composite.get_pixel(10, 10).0, RED);
    assert_eq!(
        fetcher.requests(),
        vec!["http://base.test/0/0/0.png".to_string(), "http://overlay.test/0/0/0.png".to_string()]
    );
}

#[tokio::test]
async fn test_fetch_failure_aborts_render() {
    let view = world_view(&["http://base.test/{z}/{x}/{y}.png"]);
    let result = render_view(&FailingFetcher, &view, 256, 256).await;

    assert!(matches!(result, Err(MapError::TileStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_render_without_layers_is_transparent() {
    let view = world_view(&[]);
    let composite = render_view(&world_fetcher(), &view, 64, 32).await.unwrap();

    assert_eq!(composite.dimensions(), (64, 32));
    assert!(composite.pixels().all(|p| p.0[3] == 0));
}

#[tokio::test]
async fn test_save_composite_png() {
    let view = world_view(&["http://base.test/{z}/{x}/{y}.png"]);
    let composite = render_view(&world_fetcher(), &view, 300, 200).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.png");
    save_png(&composite, &path).unwrap();

    let reloaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(reloaded.dimensions(), (300, 200));
    assert_eq!(reloaded.get_pixel(150, 100).0, RED);
}
