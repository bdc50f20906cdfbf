//! Consumers that turn a configured view into something a browser runs.

pub mod leaflet;

pub use leaflet::{LeafletPage, LeafletScript};
