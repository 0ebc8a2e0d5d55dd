//! Strings to glyph and line records
//!
//! One glyph record per character (or per shaped glyph), one line record
//! per `\n`-separated line. Newlines keep a record so indices stay aligned
//! with the source string; it is parked at the sentinel with the notdef
//! glyphs.
//!
//! Coordinates are pixels, y-up. The first baseline sits one ascender
//! below `origin.y`; each further line drops by the line height.

use serde::Serialize;

use quadglyph_core::{
    error::Result,
    records::{GlyphLayoutArray, GlyphLayoutRecord, LineLayoutArray, LineLayoutRecord},
    traits::{FontRef, Shaper},
    types::GlyphId,
    LayoutParams,
};

use crate::metrics::{line_metrics, LineMetrics, MetricSource};

/// Records for one string, plus the numbers they were computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayout {
    pub glyphs: GlyphLayoutArray,
    pub lines: LineLayoutArray,
    /// Pixels between consecutive baselines
    pub line_height: f32,
    /// Font units to pixels
    pub scale: f32,
    /// Glyph bounding radius in pixels
    pub bleed: f32,
    pub metric_source: MetricSource,
}

impl TextLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph records of line `index`
    pub fn line_glyphs(&self, index: usize) -> Option<&[GlyphLayoutRecord]> {
        let line = self.lines.get(index)?;
        let range = line.glyph_range();
        self.glyphs.slice(range.start, range.end)
    }
}

/// Pen state while filling one line
struct LineCursor {
    origin_x: f32,
    baseline: f32,
    scale: f32,
    advance: f32,
    pen_y: f32,
    first_x: Option<f32>,
    last_x: Option<f32>,
    /// Lowest and highest visible glyph y
    y_range: Option<(f32, f32)>,
}

impl LineCursor {
    fn new(origin_x: f32, baseline: f32, scale: f32) -> Self {
        Self {
            origin_x,
            baseline,
            scale,
            advance: 0.0,
            pen_y: 0.0,
            first_x: None,
            last_x: None,
            y_range: None,
        }
    }

    /// Place `glyph` at the pen plus an offset, then advance; font units
    fn place(&mut self, glyph: GlyphId, offset: (f32, f32), advance: (f32, f32)) -> GlyphLayoutRecord {
        let record = if glyph == 0 {
            GlyphLayoutRecord::hidden(glyph, self.scale)
        } else {
            let x = self.origin_x + self.advance + offset.0 * self.scale;
            let y = self.baseline + self.pen_y + offset.1 * self.scale;
            self.first_x.get_or_insert(x);
            self.last_x = Some(x);
            self.y_range = Some(match self.y_range {
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
                None => (y, y),
            });
            GlyphLayoutRecord::new(x, y, glyph, self.scale)
        };
        self.advance += advance.0 * self.scale;
        self.pen_y += advance.1 * self.scale;
        record
    }

    /// `[first_x - r, last_x + r, low_y - r, high_y + r]`
    ///
    /// Without visible glyphs, or when no glyph moved off the baseline,
    /// the vertical extent is the baseline.
    fn bounds(&self, bleed: f32) -> [f32; 4] {
        let first = self.first_x.unwrap_or(self.origin_x);
        let last = self.last_x.unwrap_or(first);
        let (low, high) = match self.y_range {
            Some((lo, hi)) => (lo.min(self.baseline), hi.max(self.baseline)),
            None => (self.baseline, self.baseline),
        };
        [first - bleed, last + bleed, low - bleed, high + bleed]
    }
}

/// Lay out `text` in `font`
///
/// With a shaper each line is shaped as a whole and its advances and
/// offsets are trusted as final; without one, advances come from the
/// font's horizontal metrics and offsets are zero.
pub fn layout(
    text: &str,
    font: &dyn FontRef,
    params: &LayoutParams,
    shaper: Option<&dyn Shaper>,
) -> Result<TextLayout> {
    let metrics = line_metrics(font)?;
    let scale = metrics.scale(params.px_per_em);
    let line_height = metrics.line_height_px(params.px_per_em);
    let bleed = font.bounding_radius() * scale;
    let newline_glyph = font.glyph_id('\n').unwrap_or(0);

    let mut glyphs = GlyphLayoutArray::with_capacity(text.len());
    let mut lines = LineLayoutArray::new();
    let mut source_lines = text.split('\n').peekable();
    let mut index = 0usize;

    while let Some(line) = source_lines.next() {
        let baseline = first_baseline(params, &metrics) - index as f32 * line_height;
        let mut cursor = LineCursor::new(params.origin.0, baseline, scale);
        let buffer_offset = glyphs.len();

        match shaper {
            Some(shaper) => {
                for g in shaper.shape(line, font)? {
                    let offset = (g.x_offset as f32, g.y_offset as f32);
                    let advance = (g.x_advance as f32, g.y_advance as f32);
                    glyphs.push(cursor.place(g.glyph_id, offset, advance));
                }
            },
            None => {
                for ch in line.chars() {
                    let gid = font.glyph_id(ch).unwrap_or(0);
                    glyphs.push(cursor.place(gid, (0.0, 0.0), (font.advance_width(gid), 0.0)));
                }
            },
        }

        if source_lines.peek().is_some() {
            glyphs.push(GlyphLayoutRecord::hidden(newline_glyph, scale));
        }

        let char_count = glyphs.len() - buffer_offset;
        lines.push(LineLayoutRecord::new(
            cursor.bounds(bleed),
            buffer_offset,
            char_count,
        ));
        index += 1;
    }

    log::debug!(
        "Laid out {} glyphs on {} lines at {}px/em ({:?} metrics, shaper: {})",
        glyphs.len(),
        lines.len(),
        params.px_per_em,
        metrics.source,
        shaper.map_or("none", |s| s.name())
    );

    Ok(TextLayout {
        glyphs,
        lines,
        line_height,
        scale,
        bleed,
        metric_source: metrics.source,
    })
}

fn first_baseline(params: &LayoutParams, metrics: &LineMetrics) -> f32 {
    params.origin.1 - metrics.ascender_px(params.px_per_em)
}
