//! Glyph outlines as a GPU curve atlas
//!
//! Two steps, run once per font:
//!
//! 1. [`decompose`] turns each glyph's outline commands into quadratic curves
//! 2. [`atlas`] packs every glyph's curves into one RGBA32F texture
//!
//! [`build_atlas`] does both for a whole [`FontRef`](quadglyph_core::FontRef)
//! and reports which glyphs it had to leave empty.

pub mod atlas;
pub mod decompose;

pub use atlas::{
    build_atlas, find_misaligned_row, jagged_to_rect, AtlasBuild, AtlasOptions, AtlasReport,
    CurveAtlas, SkippedGlyph,
};
pub use decompose::{cubic_control_point, decompose, decompose_with, flatten_curves, CurveMeta};

#[cfg(test)]
mod proptests;
