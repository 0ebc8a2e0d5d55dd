//! Per-glyph curve rows packed into one float texture
//!
//! Row `v` of the atlas belongs to glyph `v`. Each row is that glyph's
//! flattened curve list, right-padded with zero curves up to the longest
//! row in the font. Texel `(u, v)` holds floats `[4u, 4u + 4)` of row `v`.

use serde::Serialize;

use quadglyph_core::{
    error::{PackError, Result, UploadError},
    texture::{TexelRegion, TextureLimits, TextureSize, FLOATS_PER_TEXEL},
    traits::{FontRef, TextureSurface},
    types::{GlyphId, QuadraticCurve},
};

use crate::decompose::{decompose_with, flatten_curves, CurveMeta};

/// Index of the first row whose length is not a multiple of 4
pub fn find_misaligned_row<R: AsRef<[f32]>>(rows: &[R]) -> Option<usize> {
    rows.iter()
        .position(|row| row.as_ref().len() % FLOATS_PER_TEXEL != 0)
}

/// Right-pad every row with `fill` to the longest row's length
///
/// Already rectangular input comes back unchanged.
pub fn jagged_to_rect<R: AsRef<[f32]>>(rows: &[R], fill: f32) -> Vec<Vec<f32>> {
    let max_len = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let mut padded = row.as_ref().to_vec();
            padded.resize(max_len, fill);
            padded
        })
        .collect()
}

/// The packed curve texture of one font, held on the CPU
#[derive(Debug, Clone, PartialEq)]
pub struct CurveAtlas {
    size: TextureSize,
    data: Vec<f32>,
}

impl CurveAtlas {
    /// Pack float rows into a rectangle, one row per glyph
    ///
    /// Rows are checked up front; a misaligned row aborts the whole pack.
    /// An atlas whose rows are all empty is one texel wide.
    pub fn pack<R: AsRef<[f32]>>(rows: &[R], limits: &TextureLimits) -> Result<Self> {
        if rows.is_empty() {
            return Err(PackError::Empty.into());
        }
        if let Some(row) = find_misaligned_row(rows) {
            let len = rows[row].as_ref().len();
            return Err(PackError::MisalignedRow { row, len }.into());
        }

        let rect = jagged_to_rect(rows, 0.0);
        let row_floats = rect
            .first()
            .map_or(0, Vec::len)
            .max(FLOATS_PER_TEXEL);
        let width = row_floats / FLOATS_PER_TEXEL;
        limits.check(width as u64, rect.len() as u64)?;

        let mut data = Vec::with_capacity(row_floats * rect.len());
        for mut row in rect {
            row.resize(row_floats, 0.0);
            data.extend_from_slice(&row);
        }

        let size = TextureSize::new(width as u32, rows.len() as u32);
        log::debug!("Packed {} curve rows into {}x{} texels", rows.len(), size.width, size.height);
        Ok(Self { size, data })
    }

    pub fn size(&self) -> TextureSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Curve slots per row, padding included
    pub fn curves_per_row(&self) -> usize {
        self.size.width as usize * FLOATS_PER_TEXEL / QuadraticCurve::FLOATS
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The padded row of `glyph`
    pub fn row(&self, glyph: GlyphId) -> Option<&[f32]> {
        if glyph >= self.size.height {
            return None;
        }
        let stride = self.size.width as usize * FLOATS_PER_TEXEL;
        let start = glyph as usize * stride;
        self.data.get(start..start + stride)
    }

    /// The four floats at `(u, v)`
    pub fn texel(&self, u: u32, v: u32) -> Option<[f32; 4]> {
        if u >= self.size.width {
            return None;
        }
        let row = self.row(v)?;
        let start = u as usize * FLOATS_PER_TEXEL;
        Some([row[start], row[start + 1], row[start + 2], row[start + 3]])
    }

    /// Curve slot `index` of `glyph`, padding included
    pub fn curve(&self, glyph: GlyphId, index: usize) -> Option<QuadraticCurve> {
        if index >= self.curves_per_row() {
            return None;
        }
        let row = self.row(glyph)?;
        let start = index * QuadraticCurve::FLOATS;
        let floats: [f32; 8] = row.get(start..start + QuadraticCurve::FLOATS)?.try_into().ok()?;
        Some(QuadraticCurve::from_floats(floats))
    }

    /// Curves of `glyph` before its padding starts
    pub fn curve_count(&self, glyph: GlyphId) -> usize {
        (0..self.curves_per_row())
            .take_while(|i| self.curve(glyph, *i).is_some_and(|c| !c.is_padding()))
            .count()
    }

    /// Write the whole atlas into the top-left corner of `surface`
    pub fn upload(&self, surface: &mut dyn TextureSurface) -> Result<()> {
        let region = TexelRegion::new(0, 0, self.size.width, self.size.height);
        let target = surface.size();
        if self.size.width > target.width || self.size.height > target.height {
            return Err(UploadError::OutOfBounds {
                x: 0,
                y: 0,
                width: self.size.width,
                height: self.size.height,
                texture_width: target.width,
                texture_height: target.height,
            }
            .into());
        }
        surface.write_region(region, &self.data)
    }
}

/// A glyph that was left empty because its outline was unusable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedGlyph {
    pub glyph_id: GlyphId,
    pub reason: String,
}

/// What happened while building an atlas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasReport {
    pub glyph_count: u32,
    pub size: TextureSize,
    pub max_curves: usize,
    pub total_curves: usize,
    /// Glyph bounding radius in font units
    pub glyph_bounding_radius: f32,
    pub skipped: Vec<SkippedGlyph>,
}

/// An atlas plus its build report
#[derive(Debug, Clone)]
pub struct AtlasBuild {
    pub atlas: CurveAtlas,
    pub report: AtlasReport,
}

/// Options for [`build_atlas`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AtlasOptions {
    pub meta: CurveMeta,
    pub limits: TextureLimits,
}

impl AtlasOptions {
    pub fn with_meta(mut self, meta: CurveMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_limits(mut self, limits: TextureLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Decompose and pack every glyph of `font`
///
/// Glyphs whose outline cannot be read or decomposed get an empty row and
/// an entry in the report; only packing and capacity failures abort.
pub fn build_atlas(font: &dyn FontRef, options: &AtlasOptions) -> Result<AtlasBuild> {
    let glyph_count = font.glyph_count();
    let mut rows = Vec::with_capacity(glyph_count as usize);
    let mut skipped = Vec::new();
    let mut max_curves = 0;
    let mut total_curves = 0;

    for glyph_id in 0..glyph_count {
        let curves = font
            .outline(glyph_id)
            .and_then(|commands| decompose_with(&commands, options.meta).map_err(Into::into));

        match curves {
            Ok(curves) => {
                max_curves = max_curves.max(curves.len());
                total_curves += curves.len();
                rows.push(flatten_curves(&curves));
            },
            Err(e) => {
                log::warn!("Skipping glyph {}: {}", glyph_id, e);
                skipped.push(SkippedGlyph {
                    glyph_id,
                    reason: e.to_string(),
                });
                rows.push(Vec::new());
            },
        }
    }

    let atlas = CurveAtlas::pack(&rows, &options.limits)?;
    let report = AtlasReport {
        glyph_count,
        size: atlas.size(),
        max_curves,
        total_curves,
        glyph_bounding_radius: font.bounding_radius(),
        skipped,
    };

    log::info!(
        "Built curve atlas: {} glyphs, {}x{} texels, {} curves, {} skipped",
        glyph_count,
        report.size.width,
        report.size.height,
        total_curves,
        report.skipped.len()
    );

    Ok(AtlasBuild { atlas, report })
}
