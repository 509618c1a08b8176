//! # Rendering Module
//!
//! The collaborators the layout engine draws through.
//!
//! ## Traits
//!
//! - [`Renderer`]: page lifecycle, glyph placement, dot strokes
//! - [`GlyphMetrics`]: advance widths and line height for a [`FontState`]
//!
//! ## Implementations
//!
//! - [`raster::RasterRenderer`]: grayscale page images (PNG output)
//! - [`record::RecordingRenderer`]: captures every call, for tests
//! - [`metrics::FixedPitchMetrics`]: Courier-like fixed pitch
//! - [`metrics::TrueTypeMetrics`]: metrics read from a TrueType font
//! - [`fontdir`]: finds a family's TrueType files in the font directories
//!
//! ## Coordinates
//!
//! Positions are page coordinates in points, origin at the top-left corner
//! of the paper, y growing downwards. Glyph positions are baseline origins.

pub mod fontdir;
mod glyph;
pub mod metrics;
pub mod raster;
pub mod record;

pub use metrics::{FixedPitchMetrics, TrueTypeMetrics};
pub use raster::RasterRenderer;
pub use record::{DrawCall, RecordingRenderer};

use crate::font::FontState;

/// A position on the page, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Drawing sink for laid-out pages.
///
/// Calls arrive in stream order; implementations must apply them in that
/// order since geometry is positional.
pub trait Renderer {
    /// Set the paper size. Called once, before the first page begins.
    fn set_page_size(&mut self, width: f64, height: f64);

    /// Start a fresh page.
    fn begin_page(&mut self);

    /// Finalize the current page.
    fn end_page(&mut self);

    /// Draw `ch` with its baseline origin at `at`.
    fn place_glyph(&mut self, font: &FontState, at: Point, ch: char);

    /// Stroke one graphics dot with its top-left corner at `at`.
    fn stroke_dot(&mut self, at: Point, size: Size);
}

/// Text measurement service.
pub trait GlyphMetrics {
    /// Unstretched horizontal advance of `ch`.
    fn advance(&self, font: &FontState, ch: char) -> f64;

    /// Unstretched line height of the font.
    fn line_height(&self, font: &FontState) -> f64;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn set_page_size(&mut self, width: f64, height: f64) {
        (**self).set_page_size(width, height)
    }

    fn begin_page(&mut self) {
        (**self).begin_page()
    }

    fn end_page(&mut self) {
        (**self).end_page()
    }

    fn place_glyph(&mut self, font: &FontState, at: Point, ch: char) {
        (**self).place_glyph(font, at, ch)
    }

    fn stroke_dot(&mut self, at: Point, size: Size) {
        (**self).stroke_dot(at, size)
    }
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for Box<M> {
    fn advance(&self, font: &FontState, ch: char) -> f64 {
        (**self).advance(font, ch)
    }

    fn line_height(&self, font: &FontState) -> f64 {
        (**self).line_height(font)
    }
}
