//! Layout command implementation

use anyhow::bail;

use quadglyph::layout::layout;
use quadglyph::shape_hr::HarfrustShaper;
use quadglyph::traits::Shaper;
use quadglyph::LayoutParams;

use crate::cli::{LayoutArgs, ShaperArg};

pub fn run(args: &LayoutArgs) -> anyhow::Result<()> {
    if !(args.px_per_em.is_finite() && args.px_per_em > 0.0) {
        bail!("font size must be a positive number, got {}", args.px_per_em);
    }

    let font = super::load_font(&args.font)?;
    let params = LayoutParams::default().with_px_per_em(args.px_per_em);

    let shaper = match args.shaper {
        ShaperArg::None => None,
        ShaperArg::Hr => {
            let features = parse_features(args.features.as_deref())?;
            Some(HarfrustShaper::new().with_features(&features))
        },
    };

    let text = decode_newlines(&args.text);
    let result = layout(
        &text,
        &font,
        &params,
        shaper.as_ref().map(|s| s as &dyn Shaper),
    )?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Turn a literal `\n` typed on the command line into a line break
fn decode_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// `kern=0,liga` style feature list; a bare tag means "on"
fn parse_features(spec: Option<&str>) -> anyhow::Result<Vec<(String, u32)>> {
    let Some(spec) = spec else {
        return Ok(Vec::new());
    };

    spec.split([',', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((tag, value)) => match value.parse::<u32>() {
                Ok(value) => Ok((tag.to_string(), value)),
                Err(_) => bail!("invalid feature value: {}", part),
            },
            None => Ok((part.to_string(), 1)),
        })
        .collect()
}
