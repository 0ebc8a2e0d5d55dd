// this_file: crates/quadglyph-fontdb/tests/lib.rs

use std::path::PathBuf;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use quadglyph_core::{traits::FontRef, types::OutlineCommand};
use quadglyph_fontdb::Font;

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn system_font_path() -> Option<PathBuf> {
    CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
}

#[test]
fn test_metrics_when_loading_real_font_then_matches_read_fonts_tables() {
    let Some(path) = system_font_path() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let font = Font::from_file(&path).expect("load system font");
    let data = std::fs::read(&path).expect("read font bytes");
    let read_font = ReadFontRef::from_index(&data, 0).expect("parse font");

    let head = read_font.head().expect("head table");
    assert_eq!(font.units_per_em(), head.units_per_em());

    if let Ok(hhea) = read_font.hhea() {
        let metrics = font.hhea_metrics().expect("hhea metrics");
        assert_eq!(metrics.ascender, hhea.ascender().to_i16());
        assert_eq!(metrics.descender, hhea.descender().to_i16());
    }

    let bounds = font.bounds().expect("head bounds");
    assert_eq!(bounds.x_max, head.x_max());
    assert!(font.bounding_radius() > 0.0);
    assert_eq!(font.face_index(), 0);
}

#[test]
fn test_face_index_when_out_of_range_then_load_fails() {
    let Some(path) = system_font_path() else {
        eprintln!("no system font found, skipping");
        return;
    };
    // A plain .ttf holds exactly one face
    assert!(Font::from_file_index(&path, 1).is_err());
}

#[test]
fn test_outline_when_glyph_has_contours_then_starts_with_move_to() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");

    let gid = font.glyph_id('O').expect("font maps 'O'");
    let commands = font.outline(gid).expect("outline of 'O'");

    assert!(matches!(commands.first(), Some(OutlineCommand::MoveTo { .. })));
    let moves = commands
        .iter()
        .filter(|c| matches!(c, OutlineCommand::MoveTo { .. }))
        .count();
    assert_eq!(moves, 2, "'O' has an outer and an inner contour");
}

#[test]
fn test_outline_when_glyph_is_space_then_empty() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");

    let gid = font.glyph_id(' ').expect("font maps space");
    assert!(font.outline(gid).expect("space outline").is_empty());
    assert!(font.advance_width(gid) > 0.0);
}

#[test]
fn test_glyph_id_when_char_unmapped_then_none() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");

    // Private use area, no Latin text font maps it
    assert_eq!(font.glyph_id('\u{F8FF}').filter(|g| *g != 0), None);
}
