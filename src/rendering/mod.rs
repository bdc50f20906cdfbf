//! Raster compositing of a configured view.

pub mod stitch;

// Re-export main entry points
pub use stitch::{apply_opacity, render_view, save_png, stitch_layer};
