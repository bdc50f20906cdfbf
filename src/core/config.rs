//! Bootstrap configuration
//!
//! A [`BootstrapConfig`] is the serialized form of one map bootstrap: where
//! the view starts and which tile layers it stacks. Every field is a
//! validating type, so a config that deserializes is a config that can be
//! bootstrapped.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

use crate::{
    core::{
        constants::{DEFAULT_CONTAINER_ID, MAX_ZOOM_LEVEL},
        geo::LatLng,
        view::{attach_tile_layer, initialize_view, ViewHandle},
    },
    layers::tile::TileLayerSpec,
    MapError, Result,
};

/// Initial center and zoom of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    center: LatLng,
    zoom: u8,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawViewConfig {
    center: LatLng,
    zoom: i64,
}

impl ViewConfig {
    /// Validates latitude in [-90, 90], longitude in [-180, 180] and zoom in [0, MAX_ZOOM_LEVEL].
    pub fn new(center: LatLng, zoom: u8) -> Result<Self> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "{} is outside latitude [-90, 90] / longitude [-180, 180]",
                center
            )));
        }
        if zoom > MAX_ZOOM_LEVEL {
            return Err(MapError::InvalidZoom {
                zoom: zoom as i64,
                max: MAX_ZOOM_LEVEL,
            });
        }
        Ok(Self { center, zoom })
    }

    pub fn from_lat_lng(lat: f64, lng: f64, zoom: u8) -> Result<Self> {
        Self::new(LatLng::new(lat, lng), zoom)
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl Serialize for ViewConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RawViewConfig {
            center: self.center,
            zoom: self.zoom as i64,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ViewConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawViewConfig::deserialize(deserializer)?;
        let zoom = u8::try_from(raw.zoom).map_err(|_| {
            <D::Error as de::Error>::custom(MapError::InvalidZoom {
                zoom: raw.zoom,
                max: MAX_ZOOM_LEVEL,
            })
        })?;
        Self::new(raw.center, zoom).map_err(<D::Error as de::Error>::custom)
    }
}

/// Checks that `id` is `[A-Za-z][A-Za-z0-9_-]*`.
///
/// The id is written verbatim into an `id` attribute and a `#id` CSS
/// selector, so anything outside this set could break either.
pub fn validate_container_id(id: &str) -> Result<()> {
    let mut chars = id.chars();
    let id_ok = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !id_ok {
        return Err(MapError::Config(format!(
            "container '{}' is not a usable element id",
            id
        )));
    }
    Ok(())
}

fn default_container() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

/// A complete bootstrap: view, DOM mount point and layers in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    pub view: ViewConfig,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default)]
    pub layers: Vec<TileLayerSpec>,
}

impl BootstrapConfig {
    pub fn new(view: ViewConfig) -> Self {
        Self {
            view,
            container: default_container(),
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: TileLayerSpec) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Same layers and container, different view.
    pub fn with_view(&self, view: ViewConfig) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded bootstrap config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_container_id(&self.container)
    }

    /// Initializes the view and attaches every layer in order.
    pub fn bootstrap(&self) -> Result<ViewHandle> {
        self.validate()?;
        let mut view = initialize_view(self.view);
        for layer in &self.layers {
            attach_tile_layer(&mut view, layer.clone());
        }
        Ok(view)
    }
}
