//! Text layout for the quadglyph layout texture
//!
//! Turns a string into two record arrays: [`GlyphLayoutRecord`]s saying
//! where each glyph goes, and [`LineLayoutRecord`]s boxing each line and
//! pointing at its glyphs. Layout is a pure function of its inputs.
//!
//! [`GlyphLayoutRecord`]: quadglyph_core::GlyphLayoutRecord
//! [`LineLayoutRecord`]: quadglyph_core::LineLayoutRecord

pub mod engine;
pub mod metrics;

pub use engine::{layout, TextLayout};
pub use metrics::{line_metrics, LineMetrics, MetricSource};

#[cfg(test)]
mod proptests;
