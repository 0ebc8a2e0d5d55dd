//! The contracts between the pipeline and the outside world
//!
//! - [`FontRef`] - Your window into font metrics and outlines
//! - [`Shaper`] - Optional external shaping engine
//! - [`TextureSurface`] - Where packed texels land
//! - [`UniformSink`] - Where scalar side channels land

use crate::{
    error::Result,
    texture::{TexelRegion, TextureSize},
    types::*,
};

/// Read-only view of one loaded font
///
/// The pipeline never runs on a partially loaded font: whoever implements
/// this trait has finished parsing before the first call.
///
/// ```ignore
/// struct MyFont;
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] { &[] }
///     fn units_per_em(&self) -> u16 { 1000 }
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> { Some(ch as u32) }
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 { 600.0 }
///     fn glyph_count(&self) -> u32 { 128 }
///     fn outline(&self, _glyph_id: GlyphId) -> Result<Vec<OutlineCommand>> { Ok(vec![]) }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    ///
    /// Shapers that parse the font themselves need these. Synthetic fonts
    /// may return an empty slice.
    fn data(&self) -> &[u8];

    /// Face within [`FontRef::data`] for TTC/OTC collections
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Map a character to its glyph, `None` when the font lacks it
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Number of glyphs; valid indices are `0..glyph_count()`
    fn glyph_count(&self) -> u32;

    /// Outline commands of one glyph in font units
    ///
    /// Glyphs without an outline (space) return an empty list.
    fn outline(&self, glyph_id: GlyphId) -> Result<Vec<OutlineCommand>>;

    /// hhea ascender, descender and line gap
    fn hhea_metrics(&self) -> Option<VerticalMetrics> {
        None
    }

    /// OS/2 fsSelection and typo metrics
    fn os2_metrics(&self) -> Option<Os2Metrics> {
        None
    }

    /// Global outline box from the `head` table
    fn bounds(&self) -> Option<FontBounds> {
        None
    }

    /// Radius around a glyph origin that contains any outline, font units
    ///
    /// Falls back to one em when the font has no bounding box.
    fn bounding_radius(&self) -> f32 {
        self.bounds()
            .map(|b| b.bounding_radius())
            .unwrap_or(self.units_per_em() as f32)
    }
}

/// External shaping engine
///
/// Returns glyphs with kerning-aware advances and offsets in font units.
/// The layout engine scales them and trusts them as final positions.
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Shape one line of text (no `\n` inside)
    fn shape(&self, text: &str, font: &dyn FontRef) -> Result<Vec<ShapedGlyph>>;

    /// Flush any cached shaping data
    fn clear_cache(&self) {}
}

/// A 2D RGBA32F texture that accepts sub-region uploads
///
/// The texture object itself is never reallocated through this trait;
/// consumers bind it once.
pub trait TextureSurface {
    /// Allocated size in texels
    fn size(&self) -> TextureSize;

    /// Overwrite `region` with row-major texels, four floats each
    fn write_region(&mut self, region: TexelRegion, texels: &[f32]) -> Result<()>;
}

/// Receiver for scalar uniforms that accompany the layout texture
pub trait UniformSink {
    /// Number of valid line records in the layout texture
    fn set_line_count(&mut self, count: u32);
}

impl<T: TextureSurface + ?Sized> TextureSurface for &mut T {
    fn size(&self) -> TextureSize {
        (**self).size()
    }

    fn write_region(&mut self, region: TexelRegion, texels: &[f32]) -> Result<()> {
        (**self).write_region(region, texels)
    }
}
