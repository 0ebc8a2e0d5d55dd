//! Outline commands to uniform quadratic curves
//!
//! Every drawing command becomes exactly one [`QuadraticCurve`]:
//!
//! - lines get their midpoint as control point
//! - quadratics pass through
//! - cubics collapse to the single quadratic `-0.25(P0+P3) + 0.75(P1+P2)`
//!
//! Move-to and close produce nothing. The cubic reduction is lossy for
//! fonts that lean on cubics; the shader never sees anything but quadratics.

use quadglyph_core::{
    error::OutlineError,
    types::{OutlineCommand, QuadraticCurve},
};

/// What goes into the two metadata floats of each curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMeta {
    /// Both slots stay zero
    #[default]
    Zero,
    /// `meta1` holds the 0-based contour index within the glyph
    ContourIndex,
}

/// Decompose one glyph's outline with zeroed metadata
pub fn decompose(commands: &[OutlineCommand]) -> Result<Vec<QuadraticCurve>, OutlineError> {
    decompose_with(commands, CurveMeta::Zero)
}

/// Decompose one glyph's outline, filling metadata per `meta`
///
/// Fails on the first drawing command that has no current point, so a
/// malformed glyph never yields half a curve list.
pub fn decompose_with(
    commands: &[OutlineCommand],
    meta: CurveMeta,
) -> Result<Vec<QuadraticCurve>, OutlineError> {
    let drawing = commands.iter().filter(|c| c.is_drawing()).count();
    let mut curves = Vec::with_capacity(drawing);
    let mut current: Option<(f32, f32)> = None;
    let mut contour: i32 = -1;

    for (command_index, command) in commands.iter().enumerate() {
        let curve = match *command {
            OutlineCommand::MoveTo { x, y } => {
                current = Some((x, y));
                contour += 1;
                continue;
            },
            OutlineCommand::Close => {
                current = None;
                continue;
            },
            OutlineCommand::LineTo { x, y } => {
                let start = current.ok_or(OutlineError::NoCurrentPoint { command_index })?;
                let mid = ((start.0 + x) * 0.5, (start.1 + y) * 0.5);
                QuadraticCurve::new(start, mid, (x, y))
            },
            OutlineCommand::QuadTo { cx, cy, x, y } => {
                let start = current.ok_or(OutlineError::NoCurrentPoint { command_index })?;
                QuadraticCurve::new(start, (cx, cy), (x, y))
            },
            OutlineCommand::CubicTo {
                c0x,
                c0y,
                c1x,
                c1y,
                x,
                y,
            } => {
                let start = current.ok_or(OutlineError::NoCurrentPoint { command_index })?;
                let control = cubic_control_point(start, (c0x, c0y), (c1x, c1y), (x, y));
                QuadraticCurve::new(start, control, (x, y))
            },
        };

        let curve = match meta {
            CurveMeta::Zero => curve,
            CurveMeta::ContourIndex => QuadraticCurve {
                meta1: contour.max(0) as f32,
                ..curve
            },
        };
        current = Some((curve.x2, curve.y2));
        curves.push(curve);
    }

    Ok(curves)
}

/// Control point of the quadratic closest to a cubic with the same endpoints
pub fn cubic_control_point(
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
) -> (f32, f32) {
    (
        -0.25 * (p0.0 + p3.0) + 0.75 * (p1.0 + p2.0),
        -0.25 * (p0.1 + p3.1) + 0.75 * (p1.1 + p2.1),
    )
}

/// Curves as a row of floats, eight per curve
pub fn flatten_curves(curves: &[QuadraticCurve]) -> Vec<f32> {
    bytemuck::cast_slice(curves).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<OutlineCommand> {
        vec![
            OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
            OutlineCommand::LineTo { x: 10.0, y: 0.0 },
            OutlineCommand::LineTo { x: 10.0, y: 10.0 },
            OutlineCommand::LineTo { x: 0.0, y: 10.0 },
            OutlineCommand::LineTo { x: 0.0, y: 0.0 },
            OutlineCommand::Close,
        ]
    }

    #[test]
    fn test_line_control_point_is_midpoint() {
        let curves = decompose(&square()).unwrap();
        assert_eq!(curves.len(), 4);
        assert_eq!(
            curves[0],
            QuadraticCurve::new((0.0, 0.0), (5.0, 0.0), (10.0, 0.0))
        );
        assert_eq!(
            curves[1],
            QuadraticCurve::new((10.0, 0.0), (10.0, 5.0), (10.0, 10.0))
        );
    }

    #[test]
    fn test_quad_passes_through_with_previous_endpoint() {
        let commands = [
            OutlineCommand::MoveTo { x: 1.0, y: 2.0 },
            OutlineCommand::QuadTo {
                cx: 3.0,
                cy: 4.0,
                x: 5.0,
                y: 6.0,
            },
        ];
        let curves = decompose(&commands).unwrap();
        assert_eq!(
            curves,
            vec![QuadraticCurve::new((1.0, 2.0), (3.0, 4.0), (5.0, 6.0))]
        );
    }

    #[test]
    fn test_cubic_uses_least_squares_control_point() {
        let commands = [
            OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
            OutlineCommand::CubicTo {
                c0x: 0.0,
                c0y: 4.0,
                c1x: 8.0,
                c1y: 4.0,
                x: 8.0,
                y: 0.0,
            },
        ];
        let curves = decompose(&commands).unwrap();
        // -0.25 * (0 + 8) + 0.75 * (0 + 8) = 4, -0.25 * 0 + 0.75 * 8 = 6
        assert_eq!(curves[0].x1, 4.0);
        assert_eq!(curves[0].y1, 6.0);
        assert_eq!((curves[0].x2, curves[0].y2), (8.0, 0.0));
    }

    #[test]
    fn test_draw_before_move_when_decomposing_then_reports_index() {
        let commands = [OutlineCommand::LineTo { x: 1.0, y: 1.0 }];
        assert_eq!(
            decompose(&commands),
            Err(OutlineError::NoCurrentPoint { command_index: 0 })
        );
    }

    #[test]
    fn test_draw_after_close_when_decomposing_then_fails() {
        let mut commands = square();
        commands.push(OutlineCommand::LineTo { x: 3.0, y: 3.0 });
        assert_eq!(
            decompose(&commands),
            Err(OutlineError::NoCurrentPoint { command_index: 6 })
        );
    }

    #[test]
    fn test_contour_index_meta_counts_move_tos() {
        let mut commands = square();
        commands.extend([
            OutlineCommand::MoveTo { x: 2.0, y: 2.0 },
            OutlineCommand::LineTo { x: 4.0, y: 2.0 },
            OutlineCommand::Close,
        ]);
        let curves = decompose_with(&commands, CurveMeta::ContourIndex).unwrap();
        let contours: Vec<f32> = curves.iter().map(|c| c.meta1).collect();
        assert_eq!(contours, vec![0.0, 0.0, 0.0, 0.0, 1.0]);
        assert!(curves.iter().all(|c| c.meta2 == 0.0));
    }

    #[test]
    fn test_flatten_is_eight_floats_per_curve() {
        let curves = decompose(&square()).unwrap();
        let row = flatten_curves(&curves);
        assert_eq!(row.len(), 32);
        assert_eq!(&row[0..8], &[0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
    }
}
