//! Where a run of texels lands in the layout texture
//!
//! A record array is flattened to texels and poured row by row into a
//! texture of fixed width. Glyph records fill rows from the top, line
//! records from the bottom, so the two runs only meet when the texture
//! is full.

use quadglyph_core::texture::TexelRegion;

/// Which edge of the texture a record run starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// Row 0 first, growing downwards in texel rows
    Top,
    /// Last row first, growing upwards
    Bottom,
}

impl StreamEnd {
    /// Texture row of the `row`-th row of this run
    pub fn texture_row(self, row: u32, height: u32) -> u32 {
        match self {
            StreamEnd::Top => row,
            StreamEnd::Bottom => height - 1 - row,
        }
    }
}

/// Rows a run of `texels` reserves: `texels / width + 1`
///
/// The extra row holds the partial tail; an exact multiple of `width`
/// still reserves it so the count only depends on the division.
pub fn rows_needed(texels: usize, width: u32) -> u32 {
    (texels / width.max(1) as usize) as u32 + 1
}

/// One row of a run: which texels go where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First texel of the run that lands in this row
    pub start: usize,
    /// One past the last
    pub end: usize,
    pub region: TexelRegion,
}

/// Split `texels` into per-row uploads for a texture `width` wide
///
/// Full rows come first, then the partial last row when there is one.
/// Zero-length tails produce no span.
pub fn row_spans(texels: usize, width: u32, height: u32, end: StreamEnd) -> Vec<RowSpan> {
    let width_texels = width.max(1) as usize;
    let full_rows = texels / width_texels;
    let tail = texels % width_texels;

    let mut spans = Vec::with_capacity(full_rows + 1);
    for row in 0..full_rows {
        let y = end.texture_row(row as u32, height);
        spans.push(RowSpan {
            start: row * width_texels,
            end: (row + 1) * width_texels,
            region: TexelRegion::new(0, y, width, 1),
        });
    }
    if tail > 0 {
        let y = end.texture_row(full_rows as u32, height);
        spans.push(RowSpan {
            start: full_rows * width_texels,
            end: texels,
            region: TexelRegion::new(0, y, tail as u32, 1),
        });
    }
    spans
}
