//! # Page Layout Engine
//!
//! Owns the cursor, page geometry and font state, and turns "print a char /
//! advance a line / break the page" intents into [`Renderer`] calls.
//!
//! ## Geometry
//!
//! ```text
//! ┌──────────────────────────────── page ───────────────────────────────┐
//! │            top margin                                               │
//! │   ┌─────────────────────── printable area ──────────────────────┐   │
//! │   │ (0,0)                                                       │   │
//! │   │  cursor.x →                                                 │   │
//! │   │  cursor.y ↓ (baseline)                                      │   │
//! │   └─────────────────────────────────────────────────────────────┘   │
//! │            bottom margin                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cursor is relative to the printable area; renderer calls receive page
//! coordinates. Home is `(0, line_spacing)` so the first line sits fully
//! inside the printable area.

mod graphics;

pub use graphics::{DOT_PITCH_X, DOT_PITCH_Y, DOT_SIZE, GRAPHICS_ANCHOR};

use crate::font::{FontSlant, FontState, FontWeight};
use crate::page::{POINTS_PER_INCH, PageGeometry};
use crate::pixmap::Pixmap;
use crate::render::{GlyphMetrics, Point, Renderer};

/// Default tab width, in spaces.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// The operations the interpreters drive.
///
/// [`PageLayoutEngine`] is the real implementation; interpreter tests use a
/// recording stand-in.
pub trait Layout {
    /// Place a char at the cursor, wrapping first if it would overflow.
    fn print_char(&mut self, ch: char);
    /// Insert `tab_width` spaces.
    fn print_tab(&mut self);
    fn carriage_return(&mut self);
    fn line_feed(&mut self);
    /// Carriage return followed by line feed.
    fn new_line(&mut self) {
        self.carriage_return();
        self.line_feed();
    }
    fn new_page(&mut self);
    /// Number of pages begun so far (1 on the first page).
    fn page_count(&self) -> usize;

    fn set_font_weight(&mut self, weight: FontWeight);
    fn set_font_slant(&mut self, slant: FontSlant);
    fn set_underline(&mut self, underline: bool);
    /// Commit staged weight/slant/underline edits.
    fn use_current_font(&mut self);
    fn stretch_font(&mut self, stretch_x: f64, stretch_y: f64);

    /// Fixed line spacing, in inches.
    fn set_line_spacing(&mut self, inches: f64);
    /// Back to the font-derived line spacing.
    fn reset_line_spacing(&mut self);
    fn set_tab_width(&mut self, spaces: usize);

    /// Draw a graphics block at the cursor without moving it.
    fn append_graphics(&mut self, pixmap: &Pixmap);
}

/// Cursor within the printable area, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

/// Active line advance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineSpacing {
    /// Font line height × vertical stretch
    #[default]
    FontDerived,
    /// Fixed distance in points
    Fixed(f64),
}

/// Layout engine over a renderer and a metrics provider.
pub struct PageLayoutEngine<R, M> {
    renderer: R,
    metrics: M,
    page: PageGeometry,
    cursor: Cursor,
    /// Font in effect for placed glyphs
    font: FontState,
    /// Font with uncommitted attribute edits
    pending: FontState,
    line_spacing: LineSpacing,
    tab_width: usize,
    pages: usize,
}

impl<R: Renderer, M: GlyphMetrics> PageLayoutEngine<R, M> {
    /// Create the engine and begin the first page.
    pub fn new(mut renderer: R, metrics: M, page: PageGeometry, font: FontState) -> Self {
        renderer.set_page_size(page.width, page.height);
        renderer.begin_page();

        let mut engine = Self {
            renderer,
            metrics,
            page,
            cursor: Cursor::default(),
            pending: font.clone(),
            font,
            line_spacing: LineSpacing::FontDerived,
            tab_width: DEFAULT_TAB_WIDTH,
            pages: 1,
        };
        engine.home();
        engine
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn font(&self) -> &FontState {
        &self.font
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Current line advance in points.
    pub fn line_spacing(&self) -> f64 {
        match self.line_spacing {
            LineSpacing::FontDerived => self.metrics.line_height(&self.font) * self.font.stretch_y,
            LineSpacing::Fixed(points) => points,
        }
    }

    /// Replace family and size (and optionally weight/slant). Takes effect
    /// immediately.
    pub fn set_font(&mut self, family: &str, size: f64, slant: FontSlant, weight: FontWeight) {
        debug_assert!(size > 0.0);
        self.pending.family = family.to_string();
        self.pending.size = size;
        self.pending.slant = slant;
        self.pending.weight = weight;
        self.use_current_font();
    }

    /// Reset cursor to the home position.
    fn home(&mut self) {
        self.cursor = Cursor {
            x: 0.0,
            y: self.line_spacing(),
        };
    }

    /// Page coordinates of the cursor.
    fn cursor_on_page(&self) -> Point {
        Point::new(
            self.page.margins.left + self.cursor.x,
            self.page.margins.top + self.cursor.y,
        )
    }

    /// Finalize the last page and hand back the renderer.
    pub fn finish(mut self) -> R {
        self.renderer.end_page();
        self.renderer
    }
}

impl<R: Renderer, M: GlyphMetrics> Layout for PageLayoutEngine<R, M> {
    fn print_char(&mut self, ch: char) {
        let advance = self.metrics.advance(&self.font, ch) * self.font.stretch_x;

        // A glyph wider than the whole line is placed anyway at x = 0.
        let overflows = self.page.margins.left + self.cursor.x + advance > self.page.right_limit();
        if overflows && self.cursor.x > 0.0 {
            self.new_line();
        }

        let at = self.cursor_on_page();
        self.renderer.place_glyph(&self.font, at, ch);

        // y_advance is ignored: layout is strictly line based.
        self.cursor.x += advance;
    }

    fn print_tab(&mut self) {
        for _ in 0..self.tab_width {
            self.print_char(' ');
        }
    }

    fn carriage_return(&mut self) {
        self.cursor.x = 0.0;
    }

    fn line_feed(&mut self) {
        self.cursor.y += self.line_spacing();

        if self.page.margins.top + self.cursor.y > self.page.bottom_limit() {
            log::trace!("forced page break after page {}", self.pages);
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.renderer.end_page();
        self.renderer.begin_page();
        self.pages += 1;
        self.home();
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn set_font_weight(&mut self, weight: FontWeight) {
        self.pending.weight = weight;
    }

    fn set_font_slant(&mut self, slant: FontSlant) {
        self.pending.slant = slant;
    }

    fn set_underline(&mut self, underline: bool) {
        self.pending.underline = underline;
    }

    fn use_current_font(&mut self) {
        self.pending.stretch_x = self.font.stretch_x;
        self.pending.stretch_y = self.font.stretch_y;
        self.font = self.pending.clone();
    }

    fn stretch_font(&mut self, stretch_x: f64, stretch_y: f64) {
        self.font.stretch_x = stretch_x;
        self.font.stretch_y = stretch_y;
    }

    fn set_line_spacing(&mut self, inches: f64) {
        self.line_spacing = LineSpacing::Fixed(inches * POINTS_PER_INCH);
    }

    fn reset_line_spacing(&mut self) {
        self.line_spacing = LineSpacing::FontDerived;
    }

    fn set_tab_width(&mut self, spaces: usize) {
        self.tab_width = spaces;
    }

    fn append_graphics(&mut self, pixmap: &Pixmap) {
        let origin = self.cursor_on_page();
        graphics::stroke_pixmap(&mut self.renderer, origin, pixmap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Margins;
    use crate::render::{DrawCall, FixedPitchMetrics, RecordingRenderer};
    use pretty_assertions::assert_eq;

    /// 8 pt font: 4 pt advance, 10 pt line height.
    const METRICS: FixedPitchMetrics = FixedPitchMetrics {
        advance_ratio: 0.5,
        height_ratio: 1.25,
    };

    /// 100×100 pt page with 10 pt margins: 80×80 printable, 20 chars a line.
    fn engine() -> PageLayoutEngine<RecordingRenderer, FixedPitchMetrics> {
        let page = PageGeometry::new(100.0, 100.0, Margins::uniform(10.0)).unwrap();
        PageLayoutEngine::new(
            RecordingRenderer::new(),
            METRICS,
            page,
            FontState::new("Courier New", 8.0),
        )
    }

    #[test]
    fn test_starts_at_home() {
        let e = engine();
        assert_eq!(e.cursor(), Cursor { x: 0.0, y: 10.0 });
        assert_eq!(e.page_count(), 1);
        assert_eq!(
            e.renderer().calls,
            vec![
                DrawCall::PageSize {
                    width: 100.0,
                    height: 100.0
                },
                DrawCall::BeginPage
            ]
        );
    }

    #[test]
    fn test_print_char_advances_and_places() {
        let mut e = engine();
        e.print_char('A');
        e.print_char('B');
        assert_eq!(e.cursor().x, 8.0);
        assert_eq!(
            e.renderer().glyphs(),
            vec![('A', Point::new(10.0, 20.0)), ('B', Point::new(14.0, 20.0))]
        );
    }

    #[test]
    fn test_wraps_before_overflow() {
        let mut e = engine();
        for _ in 0..21 {
            e.print_char('x');
        }
        let glyphs = e.renderer().glyphs();
        assert_eq!(glyphs[19].1, Point::new(86.0, 20.0));
        assert_eq!(glyphs[20].1, Point::new(10.0, 30.0));
        assert_eq!(e.cursor(), Cursor { x: 4.0, y: 20.0 });
    }

    #[test]
    fn test_overwide_first_glyph_placed_at_line_start() {
        let mut e = engine();
        e.stretch_font(30.0, 1.0);
        e.print_char('W');
        assert_eq!(e.renderer().glyphs(), vec![('W', Point::new(10.0, 20.0))]);
        // The next glyph wraps exactly once.
        e.print_char('W');
        assert_eq!(e.renderer().glyphs()[1].1, Point::new(10.0, 30.0));
        assert_eq!(e.cursor().y, 20.0);
    }

    #[test]
    fn test_line_feed_keeps_x() {
        let mut e = engine();
        e.print_char('A');
        e.line_feed();
        assert_eq!(e.cursor(), Cursor { x: 4.0, y: 20.0 });
        e.carriage_return();
        assert_eq!(e.cursor().x, 0.0);
    }

    #[test]
    fn test_line_feed_breaks_page_at_bottom() {
        let mut e = engine();
        // y = 80 still fits the 80 pt printable height.
        for _ in 0..7 {
            e.line_feed();
        }
        assert_eq!(e.page_count(), 1);
        assert_eq!(e.cursor().y, 80.0);
        e.line_feed();
        assert_eq!(e.page_count(), 2);
        assert_eq!(e.cursor(), Cursor { x: 0.0, y: 10.0 });
    }

    #[test]
    fn test_fixed_line_spacing() {
        let mut e = engine();
        e.set_line_spacing(90.0 / 180.0);
        e.line_feed();
        assert_eq!(e.cursor().y, 46.0);
        e.reset_line_spacing();
        assert_eq!(e.line_spacing(), 10.0);
    }

    #[test]
    fn test_font_edits_need_commit() {
        let mut e = engine();
        e.set_font_weight(FontWeight::Bold);
        e.set_font_slant(FontSlant::Italic);
        assert_eq!(e.font().weight, FontWeight::Normal);
        e.use_current_font();
        assert_eq!(e.font().weight, FontWeight::Bold);
        assert_eq!(e.font().slant, FontSlant::Italic);
    }

    #[test]
    fn test_commit_keeps_stretch() {
        let mut e = engine();
        e.stretch_font(2.0, 1.0);
        e.set_underline(true);
        e.use_current_font();
        assert_eq!(e.font().stretch_x, 2.0);
        assert!(e.font().underline);
    }

    #[test]
    fn test_stretch_scales_advance() {
        let mut e = engine();
        e.stretch_font(2.0, 1.0);
        e.print_char('A');
        assert_eq!(e.cursor().x, 8.0);
    }

    #[test]
    fn test_tab_inserts_spaces() {
        let mut e = engine();
        e.set_tab_width(3);
        e.print_tab();
        assert_eq!(e.renderer().text(), "   ");
        assert_eq!(e.cursor().x, 12.0);
    }

    #[test]
    fn test_finish_ends_last_page() {
        let mut e = engine();
        e.new_page();
        let r = e.finish();
        assert_eq!(r.page_count(), 2);
        assert_eq!(r.calls.last(), Some(&DrawCall::EndPage));
    }

    #[test]
    fn test_set_font_applies_immediately() {
        let mut e = engine();
        e.set_font("Courier", 20.0, FontSlant::Normal, FontWeight::Bold);
        assert_eq!(e.font().size, 20.0);
        assert!(e.font().is_bold());
        e.print_char('A');
        assert_eq!(e.cursor().x, 10.0);
    }
}
