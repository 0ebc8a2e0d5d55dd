//! Info command implementation
//!
//! Font facts that decide how text will be laid out.

use serde::Serialize;

use quadglyph::layout::{line_metrics, MetricSource};
use quadglyph::traits::FontRef;

use crate::cli::InfoArgs;

#[derive(Debug, Serialize)]
struct FontInfo {
    units_per_em: u16,
    glyph_count: u32,
    metric_source: MetricSource,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    glyph_bounding_radius: f32,
}

pub fn run(args: &InfoArgs) -> anyhow::Result<()> {
    let font = super::load_font(&args.font)?;
    let metrics = line_metrics(&font)?;

    let info = FontInfo {
        units_per_em: font.units_per_em(),
        glyph_count: font.glyph_count(),
        metric_source: metrics.source,
        ascender: metrics.metrics.ascender,
        descender: metrics.metrics.descender,
        line_gap: metrics.metrics.line_gap,
        glyph_bounding_radius: font.bounding_radius(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("quadglyph v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Font:           {}", args.font.font_file.display());
    println!("Units per em:   {}", info.units_per_em);
    println!("Glyphs:         {}", info.glyph_count);
    println!("Metric source:  {:?}", info.metric_source);
    println!(
        "Vertical:       ascender {}, descender {}, line gap {}",
        info.ascender, info.descender, info.line_gap
    );
    println!("Bounding radius: {:.1}", info.glyph_bounding_radius);
    Ok(())
}
