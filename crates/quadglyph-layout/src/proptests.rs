use super::*;
use proptest::prelude::*;
use quadglyph_core::{
    error::Result,
    traits::FontRef,
    types::{GlyphId, OutlineCommand, VerticalMetrics},
    LayoutParams,
};

/// Digits have no glyph, everything else maps to its code point
struct SparseFont;

impl FontRef for SparseFont {
    fn data(&self) -> &[u8] {
        &[]
    }
    fn units_per_em(&self) -> u16 {
        2048
    }
    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        (!ch.is_ascii_digit()).then_some(ch as u32)
    }
    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        (glyph_id % 7) as f32 * 100.0 + 300.0
    }
    fn glyph_count(&self) -> u32 {
        0x11_0000
    }
    fn outline(&self, _glyph_id: GlyphId) -> Result<Vec<OutlineCommand>> {
        Ok(Vec::new())
    }
    fn hhea_metrics(&self) -> Option<VerticalMetrics> {
        Some(VerticalMetrics {
            ascender: 1900,
            descender: -500,
            line_gap: 67,
        })
    }
}

// Property: line i ends exactly where line i+1 starts, and lines cover every glyph
proptest! {
    #[test]
    fn prop_line_offsets_chain(text in "[a-z0-9 \n]{0,64}", px in 4.0f32..96.0) {
        let params = LayoutParams::default().with_px_per_em(px);
        let out = layout(&text, &SparseFont, &params, None).unwrap();

        let lines: Vec<_> = out.lines.iter().copied().collect();
        prop_assert_eq!(lines.len(), text.split('\n').count());
        prop_assert_eq!(lines[0].buffer_offset(), 0);
        for pair in lines.windows(2) {
            prop_assert_eq!(pair[0].buffer_offset() + pair[0].char_count(), pair[1].buffer_offset());
        }
        let last = lines[lines.len() - 1];
        prop_assert_eq!(last.buffer_offset() + last.char_count(), out.glyph_count());
        prop_assert_eq!(out.glyph_count(), text.chars().count());
    }
}

// Property: glyph 0 never gets a finite position
proptest! {
    #[test]
    fn prop_notdef_never_on_screen(text in "[a-z0-9\n]{0,64}") {
        let out = layout(&text, &SparseFont, &LayoutParams::default(), None).unwrap();
        for record in out.glyphs.iter() {
            if record.glyph_id() == 0 {
                prop_assert!(!record.is_visible());
            }
        }
    }
}

// Property: each line box contains every visible glyph origin of that line
proptest! {
    #[test]
    fn prop_line_box_contains_its_glyphs(text in "[a-z \n]{1,48}") {
        let out = layout(&text, &SparseFont, &LayoutParams::default(), None).unwrap();
        for (i, line) in out.lines.iter().enumerate() {
            for g in out.line_glyphs(i).unwrap_or_default().iter().filter(|g| g.is_visible()) {
                prop_assert!(line.x1 <= g.x && g.x <= line.x2);
                prop_assert!(line.y1 <= g.y && g.y <= line.y2);
            }
        }
    }
}
