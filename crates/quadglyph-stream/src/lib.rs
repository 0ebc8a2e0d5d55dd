//! The layout texture stream
//!
//! Owns the texture that holds the current glyph and line records and
//! rewrites it in place on every content change. See [`LayoutStream`].

pub mod geometry;
pub mod stream;

pub use geometry::{row_spans, rows_needed, RowSpan, StreamEnd};
pub use stream::{LayoutStream, StreamConfig};

#[cfg(test)]
mod proptests;
