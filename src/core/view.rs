//! View bootstrap: create a view, then attach tile layers to it.
//!
//! There is no global map object. [`initialize_view`] returns an owned
//! [`ViewHandle`] and the caller passes it to whatever consumes it.

use crate::{
    core::{config::ViewConfig, geo::LatLng},
    layers::{
        manager::{AttachedLayer, LayerId, LayerManager},
        tile::TileLayerSpec,
    },
};

/// A configured map view: fixed center and zoom plus its tile layers.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    config: ViewConfig,
    layer_manager: LayerManager,
}

/// Creates a view centered on `config.center()` at `config.zoom()` with no layers.
pub fn initialize_view(config: ViewConfig) -> ViewHandle {
    log::debug!(
        "initializing view at {} zoom {}",
        config.center(),
        config.zoom()
    );
    ViewHandle {
        config,
        layer_manager: LayerManager::new(),
    }
}

/// Registers `spec` on top of the layers already attached to `view`.
pub fn attach_tile_layer(view: &mut ViewHandle, spec: TileLayerSpec) {
    view.attach(spec);
}

impl ViewHandle {
    /// Method form of [`attach_tile_layer`]; returns the id of the new layer.
    pub fn attach(&mut self, spec: TileLayerSpec) -> LayerId {
        if spec.has_unsharded_placeholder() {
            log::warn!(
                "tile template {} uses {{s}} without subdomains; fetched URLs keep it literal while Leaflet shards over \"abc\"",
                spec.url_template()
            );
        }
        let id = self.layer_manager.add_layer(spec);
        log::debug!("attached {} ({} layers)", id, self.layer_manager.len());
        id
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn center(&self) -> LatLng {
        self.config.center()
    }

    pub fn zoom(&self) -> u8 {
        self.config.zoom()
    }

    /// Layers in paint order, bottom first.
    pub fn layers(&self) -> &[AttachedLayer] {
        self.layer_manager.layers()
    }

    pub fn layer(&self, id: LayerId) -> Option<&AttachedLayer> {
        self.layer_manager.get_layer(id)
    }

    pub fn layer_count(&self) -> usize {
        self.layer_manager.len()
    }

    pub fn bottommost(&self) -> Option<&AttachedLayer> {
        self.layer_manager.bottommost()
    }

    pub fn topmost(&self) -> Option<&AttachedLayer> {
        self.layer_manager.topmost()
    }

    /// Credits the consuming UI has to display, in paint order.
    pub fn attributions(&self) -> Vec<&str> {
        self.layer_manager.attributions()
    }
}
