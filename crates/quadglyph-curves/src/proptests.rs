use super::*;
use proptest::prelude::*;
use quadglyph_core::{texture::TextureLimits, types::OutlineCommand};

fn coord() -> impl Strategy<Value = f32> {
    -2048.0f32..2048.0
}

fn drawing_command() -> impl Strategy<Value = OutlineCommand> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| OutlineCommand::LineTo { x, y }),
        (coord(), coord(), coord(), coord())
            .prop_map(|(cx, cy, x, y)| OutlineCommand::QuadTo { cx, cy, x, y }),
        (coord(), coord(), coord(), coord(), coord(), coord()).prop_map(
            |(c0x, c0y, c1x, c1y, x, y)| OutlineCommand::CubicTo {
                c0x,
                c0y,
                c1x,
                c1y,
                x,
                y
            }
        ),
    ]
}

/// Well-formed outlines: every contour opens with a move-to
fn outline() -> impl Strategy<Value = Vec<OutlineCommand>> {
    prop::collection::vec(
        (
            coord(),
            coord(),
            prop::collection::vec(drawing_command(), 0..12),
            any::<bool>(),
        ),
        0..5,
    )
    .prop_map(|contours| {
        let mut commands = Vec::new();
        for (x, y, body, close) in contours {
            commands.push(OutlineCommand::MoveTo { x, y });
            commands.extend(body);
            if close {
                commands.push(OutlineCommand::Close);
            }
        }
        commands
    })
}

fn rows() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(
        (0usize..6).prop_flat_map(|curves| prop::collection::vec(coord(), curves * 8)),
        1..8,
    )
}

// Property: one curve per drawing command, nothing for move-to and close
proptest! {
    #[test]
    fn prop_curve_count_matches_drawing_commands(commands in outline()) {
        let curves = decompose(&commands).unwrap();
        let skipped = commands
            .iter()
            .filter(|c| matches!(c, OutlineCommand::MoveTo { .. } | OutlineCommand::Close))
            .count();
        prop_assert_eq!(curves.len(), commands.len() - skipped);
    }
}

// Property: each curve ends where its command ends and order is preserved
proptest! {
    #[test]
    fn prop_curve_endpoints_follow_command_order(commands in outline()) {
        let curves = decompose(&commands).unwrap();
        let ends: Vec<(f32, f32)> = commands
            .iter()
            .filter_map(|c| match *c {
                OutlineCommand::LineTo { x, y }
                | OutlineCommand::QuadTo { x, y, .. }
                | OutlineCommand::CubicTo { x, y, .. } => Some((x, y)),
                _ => None,
            })
            .collect();
        let got: Vec<(f32, f32)> = curves.iter().map(|c| (c.x2, c.y2)).collect();
        prop_assert_eq!(got, ends);
    }
}

// Property: cubic control point is -0.25(P0+P3) + 0.75(P1+P2)
proptest! {
    #[test]
    fn prop_cubic_control_point_formula(
        p0 in (coord(), coord()),
        p1 in (coord(), coord()),
        p2 in (coord(), coord()),
        p3 in (coord(), coord()),
    ) {
        let commands = [
            OutlineCommand::MoveTo { x: p0.0, y: p0.1 },
            OutlineCommand::CubicTo { c0x: p1.0, c0y: p1.1, c1x: p2.0, c1y: p2.1, x: p3.0, y: p3.1 },
        ];
        let curve = decompose(&commands).unwrap()[0];
        let ex = -0.25 * (p0.0 + p3.0) + 0.75 * (p1.0 + p2.0);
        let ey = -0.25 * (p0.1 + p3.1) + 0.75 * (p1.1 + p2.1);
        prop_assert!((curve.x1 - ex).abs() <= 1e-3);
        prop_assert!((curve.y1 - ey).abs() <= 1e-3);
        prop_assert_eq!((curve.x0, curve.y0), p0);
    }
}

// Property: reading a row back gives the input followed by zeros
proptest! {
    #[test]
    fn prop_pack_then_read_row_reproduces_padded_input(rows in rows()) {
        let atlas = CurveAtlas::pack(&rows, &TextureLimits::new(1024)).unwrap();
        for (v, row) in rows.iter().enumerate() {
            let packed = atlas.row(v as u32).unwrap();
            prop_assert_eq!(&packed[..row.len()], row.as_slice());
            prop_assert!(packed[row.len()..].iter().all(|f| *f == 0.0));
        }
    }
}

// Property: rectangular input passes through jagged_to_rect unchanged
proptest! {
    #[test]
    fn prop_jagged_to_rect_is_idempotent(rows in rows()) {
        let once = jagged_to_rect(&rows, 0.0);
        let twice = jagged_to_rect(&once, 0.0);
        prop_assert_eq!(once, twice);
    }
}
