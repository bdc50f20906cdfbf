//! Tile layer specifications.
//!
//! A [`TileLayerSpec`] is the registration record for one tile source: its
//! URL template plus the handful of options a Leaflet-style engine
//! recognizes. Options are kept as `Option`s so an unset value reaches the
//! engine as "unset" and the engine's own default applies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    core::{
        constants::{ENGINE_DEFAULT_MAX_ZOOM, ENGINE_DEFAULT_OPACITY},
        geo::TileCoord,
    },
    tiles::{source::TileSource, template::UrlTemplate},
    MapError, Result,
};

/// Layer opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Opacity(f64);

impl Opacity {
    pub const OPAQUE: Opacity = Opacity(1.0);

    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MapError::InvalidOpacity(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Opacity {
    type Error = MapError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Opacity> for f64 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

/// Host-name shards substituted for `{s}`.
///
/// Accepts Leaflet's two spellings: a string of single letters (`"abcd"`)
/// or an array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subdomains(Vec<String>);

impl Subdomains {
    /// One shard per character of `letters`.
    pub fn from_letters(letters: &str) -> Self {
        Self(letters.chars().map(String::from).collect())
    }

    pub fn new<I, S>(shards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(shards.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Shard serving `coord`, or `None` for an empty set.
    pub fn pick(&self, coord: TileCoord) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }
        let idx = ((coord.x as u64 + coord.y as u64) % self.0.len() as u64) as usize;
        Some(self.0[idx].as_str())
    }
}

impl Serialize for Subdomains {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.iter().all(|s| s.chars().count() == 1) {
            serializer.serialize_str(&self.0.concat())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Subdomains {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Letters(String),
            List(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Letters(letters) => Subdomains::from_letters(&letters),
            Repr::List(list) => Subdomains(list),
        })
    }
}

/// Registration record for one tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TileLayerSpec {
    url_template: UrlTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subdomains: Option<Subdomains>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_zoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opacity: Option<Opacity>,
}

impl TileLayerSpec {
    /// Parses `template` and creates a spec with every option unset.
    pub fn new(template: &str) -> Result<Self> {
        UrlTemplate::parse(template).map(Self::from_template)
    }

    pub fn from_template(url_template: UrlTemplate) -> Self {
        Self {
            url_template,
            attribution: None,
            subdomains: None,
            max_zoom: None,
            opacity: None,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn with_subdomains(mut self, subdomains: Subdomains) -> Self {
        self.subdomains = Some(subdomains);
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn with_opacity(mut self, opacity: Opacity) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn url_template(&self) -> &UrlTemplate {
        &self.url_template
    }

    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    pub fn subdomains(&self) -> Option<&Subdomains> {
        self.subdomains.as_ref()
    }

    /// Configured max zoom, `None` when the engine default applies.
    pub fn max_zoom(&self) -> Option<u8> {
        self.max_zoom
    }

    /// Configured opacity, `None` when the engine default applies.
    pub fn opacity(&self) -> Option<Opacity> {
        self.opacity
    }

    pub fn effective_max_zoom(&self) -> u8 {
        self.max_zoom.unwrap_or(ENGINE_DEFAULT_MAX_ZOOM)
    }

    pub fn effective_opacity(&self) -> f64 {
        self.opacity.map_or(ENGINE_DEFAULT_OPACITY, Opacity::value)
    }

    /// True when `{s}` appears in the template but no shard set was given.
    pub fn has_unsharded_placeholder(&self) -> bool {
        self.url_template.uses_subdomains()
            && self.subdomains.as_ref().map_or(true, Subdomains::is_empty)
    }
}

impl TileSource for TileLayerSpec {
    fn url(&self, coord: TileCoord) -> String {
        self.url_template.expand(coord, self.subdomains.as_ref())
    }

    fn max_zoom(&self) -> u8 {
        self.effective_max_zoom()
    }
}
