use crate::{layers::tile::TileLayerSpec, prelude::HashSet};

/// Identifier handed out when a layer is attached; ids grow with attachment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// A tile layer after it has been registered with a view.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedLayer {
    pub id: LayerId,
    pub spec: TileLayerSpec,
}

/// Manages the tile layers of a view in paint order.
///
/// Paint order is attachment order: index 0 is painted first (bottom), the
/// last entry is painted last (top). Layers are never reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct LayerManager {
    layers: Vec<AttachedLayer>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer above all existing ones
    pub fn add_layer(&mut self, spec: TileLayerSpec) -> LayerId {
        let id = LayerId(self.layers.len());
        self.layers.push(AttachedLayer { id, spec });
        id
    }

    /// Gets a layer by id
    pub fn get_layer(&self, id: LayerId) -> Option<&AttachedLayer> {
        self.layers.get(id.0)
    }

    /// Gets all layers in paint order, bottom first
    pub fn layers(&self) -> &[AttachedLayer] {
        &self.layers
    }

    pub fn bottommost(&self) -> Option<&AttachedLayer> {
        self.layers.first()
    }

    pub fn topmost(&self) -> Option<&AttachedLayer> {
        self.layers.last()
    }

    /// Distinct attribution strings in paint order.
    pub fn attributions(&self) -> Vec<&str> {
        let mut seen = HashSet::default();
        self.layers
            .iter()
            .filter_map(|layer| layer.spec.attribution())
            .filter(|text| seen.insert(*text))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
