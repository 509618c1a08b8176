//! Recording renderer.
//!
//! Keeps every draw call in order, so layout can be asserted exactly.

use super::{Point, Renderer, Size};
use crate::font::FontState;

/// One call made on a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    PageSize { width: f64, height: f64 },
    BeginPage,
    EndPage,
    Glyph { ch: char, at: Point, font: FontState },
    Dot { at: Point, size: Size },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages begun so far.
    pub fn page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::BeginPage))
            .count()
    }

    /// Placed glyphs with their positions, in order.
    pub fn glyphs(&self) -> Vec<(char, Point)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { ch, at, .. } => Some((*ch, *at)),
                _ => None,
            })
            .collect()
    }

    /// Placed glyph chars, concatenated.
    pub fn text(&self) -> String {
        self.glyphs().into_iter().map(|(ch, _)| ch).collect()
    }

    /// Stroked dots, in order.
    pub fn dots(&self) -> Vec<Point> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Dot { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn set_page_size(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::PageSize { width, height });
    }

    fn begin_page(&mut self) {
        self.calls.push(DrawCall::BeginPage);
    }

    fn end_page(&mut self) {
        self.calls.push(DrawCall::EndPage);
    }

    fn place_glyph(&mut self, font: &FontState, at: Point, ch: char) {
        self.calls.push(DrawCall::Glyph {
            ch,
            at,
            font: font.clone(),
        });
    }

    fn stroke_dot(&mut self, at: Point, size: Size) {
        self.calls.push(DrawCall::Dot { at, size });
    }
}
