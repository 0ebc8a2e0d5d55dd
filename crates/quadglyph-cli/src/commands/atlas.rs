//! Atlas command implementation
//!
//! Builds the curve atlas, writes its texels when asked and always prints
//! the build report as JSON.

use std::fs;

use anyhow::Context;

use quadglyph::curves::{build_atlas, AtlasOptions, CurveMeta};

use crate::cli::{AtlasArgs, MetaArg};

pub fn run(args: &AtlasArgs) -> anyhow::Result<()> {
    let font = super::load_font(&args.font)?;
    let meta = match args.meta {
        MetaArg::Zero => CurveMeta::Zero,
        MetaArg::Contour => CurveMeta::ContourIndex,
    };

    let build = build_atlas(&font, &AtlasOptions::default().with_meta(meta))?;
    for skipped in &build.report.skipped {
        log::warn!("glyph {} left empty: {}", skipped.glyph_id, skipped.reason);
    }

    if let Some(path) = &args.output_file {
        // Texels are written in little-endian order whatever the host is
        let bytes: Vec<u8> = build
            .atlas
            .as_floats()
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect();
        fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    }

    println!("{}", serde_json::to_string_pretty(&build.report)?);
    Ok(())
}
