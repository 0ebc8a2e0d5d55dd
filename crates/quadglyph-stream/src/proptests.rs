use super::*;
use proptest::prelude::*;
use quadglyph_core::{
    config::WritePolicy, texture::TextureLimits, GlyphLayoutArray, GlyphLayoutRecord,
    LineLayoutArray, LineLayoutRecord,
};

fn policy() -> impl Strategy<Value = WritePolicy> {
    prop_oneof![
        Just(WritePolicy::ClearPrevious),
        Just(WritePolicy::ClampNoShrink)
    ]
}

fn records(n: usize) -> GlyphLayoutArray {
    (0..n)
        .map(|i| GlyphLayoutRecord::new(1.0 + i as f32, 1.0, 7, 1.0))
        .collect()
}

fn line_records(n: usize) -> LineLayoutArray {
    (0..n)
        .map(|i| LineLayoutRecord::new([1.0; 4], i, 1))
        .collect()
}

// Property: after any sequence of writes, nothing past the current content is non-zero
proptest! {
    #[test]
    fn prop_no_stale_texels_after_any_write_sequence(
        policy in policy(),
        width in 1u32..9,
        sizes in prop::collection::vec((0usize..24, 0usize..6), 1..12),
    ) {
        let config = StreamConfig::default()
            .with_size(width, 64)
            .with_policy(policy)
            .with_limits(TextureLimits::new(64));
        let mut stream = LayoutStream::with_host(config).unwrap();

        for (glyph_count, line_count) in sizes {
            let glyphs = records(glyph_count);
            let lines = line_records(line_count);
            if stream.write_layout(&glyphs, &lines).is_err() {
                continue;
            }

            let tex = stream.surface();
            let floats = tex.as_floats();

            // Glyph run from the top
            let glyph_floats = glyphs.as_floats().len();
            let top = &floats[..floats.len() / 2];
            prop_assert_eq!(&top[..glyph_floats], glyphs.as_floats());
            prop_assert!(top[glyph_floats..].iter().all(|f| *f == 0.0));

            // Line run from the bottom, row order reversed
            let bottom_rows: Vec<&[f32]> = (0..32u32)
                .map(|r| tex.row(63 - r).unwrap_or_default())
                .collect();
            let bottom: Vec<f32> = bottom_rows.concat();
            let line_floats = lines.as_floats().len();
            prop_assert_eq!(&bottom[..line_floats], lines.as_floats());
            prop_assert!(bottom[line_floats..].iter().all(|f| *f == 0.0));
            prop_assert_eq!(tex.line_count() as usize, line_count);
        }
    }
}
