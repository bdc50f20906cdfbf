//! End-to-end bootstrap checks: config in, configured view and Leaflet
//! bootstrap out.

use std::io::Write;
use tilestack::prelude::*;

const CARTO_DARK: &str = "http://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png";
const DENSITY: &str = "http://localhost:5000/{z}/{x}/{y}.png";
const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a> &copy; <a href=\"http://cartodb.com/attributions\">CartoDB</a>";

fn base_layer() -> TileLayerSpec {
    TileLayerSpec::new(CARTO_DARK)
        .unwrap()
        .with_attribution(CARTO_ATTRIBUTION)
        .with_subdomains(Subdomains::from_letters("abcd"))
}

fn density_layer() -> TileLayerSpec {
    TileLayerSpec::new(DENSITY).unwrap()
}

#[test]
fn test_raleigh_view_with_capped_layers() {
    let mut view = initialize_view(ViewConfig::from_lat_lng(35.774587, -78.684886, 15).unwrap());
    attach_tile_layer(&mut view, base_layer().with_max_zoom(19));
    attach_tile_layer(&mut view, density_layer().with_max_zoom(19));

    assert_eq!(view.center(), LatLng::new(35.774587, -78.684886));
    assert_eq!(view.zoom(), 15);
    assert_eq!(view.layer_count(), 2);
    assert_eq!(view.bottommost().unwrap().spec.url_template().as_str(), CARTO_DARK);
    assert_eq!(view.topmost().unwrap().spec.url_template().as_str(), DENSITY);
    assert!(view.layers().iter().all(|l| l.spec.effective_max_zoom() == 19));
}

#[test]
fn test_manhattan_view_uses_engine_defaults() {
    let view = ViewBuilder::new()
        .center(40.7831, -73.9712)
        .zoom(16)
        .tile_layer(base_layer())
        .tile_layer(density_layer())
        .build()
        .unwrap();

    assert_eq!(view.zoom(), 16);
    for layer in view.layers() {
        assert_eq!(layer.spec.max_zoom(), None);
        assert_eq!(layer.spec.effective_max_zoom(), ENGINE_DEFAULT_MAX_ZOOM);
        assert_eq!(layer.spec.effective_opacity(), ENGINE_DEFAULT_OPACITY);
    }

    let script = LeafletScript::new(&view).render().unwrap();
    assert!(!script.contains("maxZoom"));
    assert!(!script.contains("opacity"));
    assert!(script.contains("setView([40.7831, -73.9712], 16)"));
}

#[test]
fn test_script_keeps_paint_order() {
    let view = ViewBuilder::new()
        .center(35.774587, -78.684886)
        .zoom(15)
        .tile_layer(base_layer().with_max_zoom(19))
        .tile_layer(density_layer().with_max_zoom(19))
        .build()
        .unwrap();

    let script = LeafletScript::new(&view).render().unwrap();
    let base_at = script.find("cartocdn").unwrap();
    let overlay_at = script.find("localhost:5000").unwrap();
    assert!(base_at < overlay_at);
    assert_eq!(script.matches(".addTo(map);").count(), 2);
    assert_eq!(script.matches("maxZoom: 19").count(), 2);
    assert!(script.contains("subdomains: \"abcd\""));
}

#[test]
fn test_center_tile_urls() {
    let view = ViewBuilder::new()
        .center(35.774587, -78.684886)
        .zoom(15)
        .tile_layer(base_layer())
        .tile_layer(density_layer())
        .build()
        .unwrap();

    let center = TileCoord::from_lat_lng(&view.center(), view.zoom());
    assert_eq!(center, TileCoord::new(9221, 12892, 15));

    let placements = tiles_covering(&view.center(), view.zoom(), 800, 600);
    assert!(placements.iter().any(|p| p.coord == center));

    // (9221 + 12892) % 4 == 1
    assert_eq!(
        view.bottommost().unwrap().spec.url(center),
        "http://b.basemaps.cartocdn.com/dark_all/15/9221/12892.png"
    );
    assert_eq!(
        view.topmost().unwrap().spec.url(center),
        "http://localhost:5000/15/9221/12892.png"
    );
}

#[test]
fn test_attributions_only_from_attributed_layers() {
    let view = ViewBuilder::new()
        .tile_layer(base_layer())
        .tile_layer(density_layer())
        .tile_layer(base_layer())
        .build()
        .unwrap();

    assert_eq!(view.attributions(), vec![CARTO_ATTRIBUTION]);
}

#[test]
fn test_invalid_input_is_rejected() {
    assert!(matches!(
        ViewConfig::from_lat_lng(91.0, 0.0, 3),
        Err(MapError::InvalidCoordinates(_))
    ));
    assert!(matches!(
        ViewConfig::from_lat_lng(0.0, 0.0, 31),
        Err(MapError::InvalidZoom { .. })
    ));
    assert!(matches!(
        TileLayerSpec::new("http://tiles.example/{z}/{x}.png"),
        Err(MapError::InvalidTemplate { .. })
    ));
    assert!(matches!(Opacity::new(1.5), Err(MapError::InvalidOpacity(_))));
}

#[test]
fn test_load_config_file() {
    let json = r#"{
        "view": { "center": { "lat": 35.774587, "lng": -78.684886 }, "zoom": 15 },
        "container": "density",
        "layers": [
            { "urlTemplate": "http://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
              "attribution": "&copy; CartoDB", "subdomains": "abcd", "maxZoom": 19 },
            { "urlTemplate": "http://localhost:5000/{z}/{x}/{y}.png", "maxZoom": 19, "opacity": 0.8 }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = BootstrapConfig::load(file.path()).unwrap();
    assert_eq!(config.container, "density");
    assert_eq!(config.layers.len(), 2);

    let view = config.bootstrap().unwrap();
    assert_eq!(view.zoom(), 15);
    assert_eq!(view.topmost().unwrap().spec.effective_opacity(), 0.8);

    let page = LeafletPage::for_config(&view, &config).unwrap().render().unwrap();
    assert!(page.contains("<div id=\"density\"></div>"));
    assert!(page.contains("L.map(\"density\")"));
}

#[test]
fn test_config_rejects_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "view": { "center": { "lat": 0, "lng": 0 }, "zoom": 2 }, "theme": "dark" }"#)
        .unwrap();

    assert!(BootstrapConfig::load(file.path()).is_err());
}

#[test]
fn test_view_override_leaves_loaded_config() {
    let config = BootstrapConfig::new(ViewConfig::from_lat_lng(35.774587, -78.684886, 15).unwrap())
        .with_layer(base_layer().with_max_zoom(19));
    let moved = config.with_view(ViewConfig::from_lat_lng(40.7831, -73.9712, 16).unwrap());

    assert_eq!(config.view.zoom(), 15);
    assert_eq!(moved.view.zoom(), 16);
    assert_eq!(moved.layers, config.layers);
}
