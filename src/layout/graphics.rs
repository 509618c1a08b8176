//! Dot graphics placement.
//!
//! A pixmap is drawn in place next to the cursor: columns advance right by
//! [`DOT_PITCH_X`], rows advance down by [`DOT_PITCH_Y`], bit 23 is the top
//! row. Text flow is not affected.

use crate::pixmap::{DOTS_PER_COLUMN, Pixmap};
use crate::render::{Point, Renderer, Size};

/// Horizontal distance between columns, in points.
pub const DOT_PITCH_X: f64 = 0.55;

/// Vertical distance between rows, in points.
pub const DOT_PITCH_Y: f64 = 0.36;

/// Size of one stroked dot.
pub const DOT_SIZE: Size = Size::new(0.6, DOT_PITCH_Y);

/// Offset of the top-left dot from the cursor's page position. The block
/// starts slightly up and left so it lines up with the surrounding text line.
pub const GRAPHICS_ANCHOR: Point = Point::new(-4.0, -6.0);

pub(super) fn stroke_pixmap<R: Renderer>(renderer: &mut R, cursor: Point, pixmap: &Pixmap) {
    let x0 = cursor.x + GRAPHICS_ANCHOR.x;
    let y0 = cursor.y + GRAPHICS_ANCHOR.y;

    for (col, &column) in pixmap.columns().iter().enumerate() {
        let x = x0 + col as f64 * DOT_PITCH_X;
        for row in 0..DOTS_PER_COLUMN {
            if Pixmap::is_set(column, row) {
                let y = y0 + row as f64 * DOT_PITCH_Y;
                renderer.stroke_dot(Point::new(x, y), DOT_SIZE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_and_bottom_dots() {
        let mut r = RecordingRenderer::new();
        let pixmap = Pixmap::from(vec![0x80_0001]);
        stroke_pixmap(&mut r, Point::new(100.0, 100.0), &pixmap);
        assert_eq!(
            r.dots(),
            vec![
                Point::new(96.0, 94.0),
                Point::new(96.0, 94.0 + 23.0 * DOT_PITCH_Y),
            ]
        );
    }

    #[test]
    fn test_columns_advance_right() {
        let mut r = RecordingRenderer::new();
        let pixmap = Pixmap::from(vec![0x80_0000, 0x80_0000, 0]);
        stroke_pixmap(&mut r, Point::new(4.0, 6.0), &pixmap);
        assert_eq!(
            r.dots(),
            vec![Point::new(0.0, 0.0), Point::new(DOT_PITCH_X, 0.0)]
        );
    }

    #[test]
    fn test_full_column_strokes_24_dots() {
        let mut r = RecordingRenderer::new();
        stroke_pixmap(&mut r, Point::new(0.0, 0.0), &Pixmap::from(vec![0xFF_FFFF]));
        assert_eq!(r.dots().len(), 24);
    }
}
