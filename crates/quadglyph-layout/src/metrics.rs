//! Which vertical metrics a font's lines are spaced by
//!
//! OS/2 fsSelection bit 7 (USE_TYPO_METRICS) selects the typo metrics.
//! Without it the hhea metrics win. A font missing one table falls back
//! to the other; a font missing both cannot be laid out.

use serde::Serialize;

use quadglyph_core::{
    error::{MetricsError, Result},
    traits::FontRef,
    types::VerticalMetrics,
};

/// Table the vertical metrics came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricSource {
    /// OS/2 typo metrics, requested by fsSelection bit 7
    Typo,
    /// hhea metrics
    Hhea,
    /// OS/2 typo metrics because the font has no hhea table
    TypoFallback,
}

/// Vertical metrics in font units, plus where they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    pub source: MetricSource,
    pub metrics: VerticalMetrics,
    pub units_per_em: u16,
}

impl LineMetrics {
    /// Font units to pixels at `px_per_em`
    pub fn scale(&self, px_per_em: f32) -> f32 {
        px_per_em / self.units_per_em as f32
    }

    /// `(ascender - descender + line_gap) * px_per_em / units_per_em`
    pub fn line_height_px(&self, px_per_em: f32) -> f32 {
        self.metrics.line_height() as f32 * self.scale(px_per_em)
    }

    pub fn ascender_px(&self, px_per_em: f32) -> f32 {
        self.metrics.ascender as f32 * self.scale(px_per_em)
    }
}

/// Pick the vertical metrics of `font`
pub fn line_metrics(font: &dyn FontRef) -> Result<LineMetrics> {
    let units_per_em = font.units_per_em();
    if units_per_em == 0 {
        return Err(MetricsError::ZeroUnitsPerEm.into());
    }

    let os2 = font.os2_metrics();
    let (source, metrics) = match (os2, font.hhea_metrics()) {
        (Some(os2), _) if os2.use_typo_metrics() => (MetricSource::Typo, os2.typo),
        (_, Some(hhea)) => (MetricSource::Hhea, hhea),
        (Some(os2), None) => {
            log::warn!("Font has no hhea table, using OS/2 typo metrics");
            (MetricSource::TypoFallback, os2.typo)
        },
        (None, None) => return Err(MetricsError::NoVerticalMetrics.into()),
    };

    Ok(LineMetrics {
        source,
        metrics,
        units_per_em,
    })
}
