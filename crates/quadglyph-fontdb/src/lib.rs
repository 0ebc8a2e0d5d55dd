//! Where fonts come to life for the GPU pipeline
//!
//! A [`Font`] keeps the raw bytes and parses on demand. The tables layout
//! needs on every call (head, hhea, OS/2, maxp) are read once at load time;
//! cmap, hmtx and outlines are looked up per request.
//!
//! Outlines are drawn unhinted at the font's own units-per-em, so every
//! coordinate handed to the curve decomposer is in font units.

use std::fs;
use std::path::Path;

use read_fonts::{types::GlyphId, FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
    MetadataProvider,
};

use quadglyph_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::{FontBounds, OutlineCommand, Os2Metrics, VerticalMetrics},
};

/// A parsed font, ready to feed the atlas and the layout engine
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    glyph_count: u32,
    hhea: Option<VerticalMetrics>,
    os2: Option<Os2Metrics>,
    bounds: FontBounds,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into a font
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let head = font_ref
            .head()
            .map_err(|_| FontLoadError::MissingTable("head"))?;
        let units_per_em = head.units_per_em();
        let bounds = FontBounds {
            x_min: head.x_min(),
            y_min: head.y_min(),
            x_max: head.x_max(),
            y_max: head.y_max(),
        };

        let glyph_count = font_ref
            .maxp()
            .map(|maxp| maxp.num_glyphs() as u32)
            .unwrap_or(0);

        let hhea = font_ref.hhea().ok().map(|hhea| VerticalMetrics {
            ascender: hhea.ascender().to_i16(),
            descender: hhea.descender().to_i16(),
            line_gap: hhea.line_gap().to_i16(),
        });

        let os2 = font_ref.os2().ok().map(|os2| Os2Metrics {
            fs_selection: os2.fs_selection().bits(),
            typo: VerticalMetrics {
                ascender: os2.s_typo_ascender(),
                descender: os2.s_typo_descender(),
                line_gap: os2.s_typo_line_gap(),
            },
        });

        if hhea.is_none() && os2.is_none() {
            log::warn!("Font has neither hhea nor OS/2; layout will refuse it");
        }

        log::debug!(
            "Loaded font face {}: {} glyphs, {} units/em",
            face_index,
            glyph_count,
            units_per_em
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
            glyph_count,
            hhea,
            os2,
            bounds,
        })
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                hmtx.advance(GlyphId::new(glyph_id)).map(|adv| adv as f32)
            })
            .unwrap_or(self.units_per_em as f32 * 0.5)
    }

    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn outline(&self, glyph_id: u32) -> Result<Vec<OutlineCommand>> {
        let font = self.font_ref().ok_or(FontLoadError::InvalidData)?;
        let outlines = font.outline_glyphs();

        let glyph = match outlines.get(GlyphId::new(glyph_id)) {
            Some(g) => g,
            None => return Ok(Vec::new()),
        };

        let mut pen = CommandPen::default();
        let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
        glyph
            .draw(settings, &mut pen)
            .map_err(|_| FontLoadError::OutlineUnreadable(glyph_id))?;

        Ok(pen.commands)
    }

    fn hhea_metrics(&self) -> Option<VerticalMetrics> {
        self.hhea
    }

    fn os2_metrics(&self) -> Option<Os2Metrics> {
        self.os2
    }

    fn bounds(&self) -> Option<FontBounds> {
        Some(self.bounds)
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }
}

/// Records skrifa's drawing calls verbatim
#[derive(Default)]
struct CommandPen {
    commands: Vec<OutlineCommand>,
}

impl OutlinePen for CommandPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::QuadTo { cx, cy, x, y });
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::CubicTo {
            c0x: cx0,
            c0y: cy0,
            c1x: cx1,
            c1y: cy1,
            x,
            y,
        });
    }

    fn close(&mut self) {
        self.commands.push(OutlineCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_from_garbage_data_fails() {
        let result = Font::from_data(vec![0; 100]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Font::from_file("/definitely/not/here.ttf")
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("/definitely/not/here.ttf"));
    }

    #[test]
    fn test_pen_records_commands_in_order() {
        let mut pen = CommandPen::default();
        pen.move_to(0.0, 0.0);
        pen.line_to(1.0, 0.0);
        pen.quad_to(1.0, 1.0, 0.0, 1.0);
        pen.curve_to(0.0, 2.0, 1.0, 2.0, 1.0, 3.0);
        pen.close();

        assert_eq!(pen.commands.len(), 5);
        assert_eq!(pen.commands[0], OutlineCommand::MoveTo { x: 0.0, y: 0.0 });
        assert_eq!(pen.commands[4], OutlineCommand::Close);
        assert!(matches!(pen.commands[3], OutlineCommand::CubicTo { y, .. } if y == 3.0));
    }
}
