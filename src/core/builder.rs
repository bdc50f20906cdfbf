//! View builder for fluent API configuration
//!
//! This module provides a ViewBuilder that collects a center, a zoom level
//! and tile layers, validates them, and bootstraps the view in one call.

use crate::{
    core::{
        config::{BootstrapConfig, ViewConfig},
        constants::DEFAULT_CONTAINER_ID,
        geo::LatLng,
        view::ViewHandle,
    },
    layers::tile::TileLayerSpec,
    Result,
};

/// Builder for creating and configuring views
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    center: LatLng,
    zoom: u8,
    container: String,
    layers: Vec<TileLayerSpec>,
}

impl ViewBuilder {
    /// Create a new ViewBuilder centered on (0, 0) at zoom 0
    pub fn new() -> Self {
        Self {
            center: LatLng::default(),
            zoom: 0,
            container: DEFAULT_CONTAINER_ID.to_string(),
            layers: Vec::new(),
        }
    }

    /// Set the initial center
    pub fn center(mut self, lat: f64, lng: f64) -> Self {
        self.center = LatLng::new(lat, lng);
        self
    }

    /// Set the initial zoom level
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the DOM element the page mounts the map into
    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Add a tile layer above the ones added so far
    pub fn tile_layer(mut self, spec: TileLayerSpec) -> Self {
        self.layers.push(spec);
        self
    }

    /// Validate and produce the equivalent bootstrap config
    pub fn into_config(self) -> Result<BootstrapConfig> {
        let view = ViewConfig::new(self.center, self.zoom)?;
        let config = BootstrapConfig {
            view,
            container: self.container,
            layers: self.layers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the view with all layers attached
    pub fn build(self) -> Result<ViewHandle> {
        self.into_config()?.bootstrap()
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}
