//! # Raster Page Renderer
//!
//! Renders pages into 8-bit grayscale images and writes them as PNG files.
//!
//! ## Architecture
//!
//! ```text
//! place_glyph / stroke_dot (points) → scale by dpi/72 → GrayImage (pixels)
//!                                                         ↓
//!                                              end_page → finished pages
//! ```
//!
//! Glyphs are drawn from the TrueType faces given to
//! [`RasterRenderer::with_truetype`], the same faces that supply the layout
//! metrics, so ink lands inside each glyph's advance. Without them the
//! Spleen 12×24 bitmap font is scaled nearest-neighbour into a 0.6 em cell,
//! matching [`FixedPitchMetrics`](super::FixedPitchMetrics).
//!
//! Bold without a bold face is a double strike one pixel to the right,
//! italic a shear around the baseline.

use ab_glyph::{Font, FontArc, PxScale};
use image::{GrayImage, Luma};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::glyph::{GLYPH_BASELINE, GLYPH_HEIGHT, GLYPH_WIDTH, GlyphCache};
use super::{GlyphMetrics, Point, Renderer, Size, TrueTypeMetrics};
use crate::error::DotprintError;
use crate::font::FontState;
use crate::page::POINTS_PER_INCH;

const INK: Luma<u8> = Luma([0]);
const PAPER: u8 = 255;

/// Cell width as a fraction of the font size, matching fixed-pitch metrics.
const CELL_WIDTH_RATIO: f64 = 0.6;
/// Cell height as a fraction of the font size.
const CELL_HEIGHT_RATIO: f64 = 1.2;
/// Horizontal shear per pixel above the baseline for italic text.
const ITALIC_SHEAR: f64 = 0.2;
/// Anti-aliased coverage at which an outline pixel is inked.
const COVERAGE_THRESHOLD: f32 = 0.5;

pub struct RasterRenderer {
    dpi: f64,
    width_px: u32,
    height_px: u32,
    current: Option<GrayImage>,
    pages: Vec<GrayImage>,
    glyphs: GlyphCache,
    truetype: Option<TrueTypeMetrics>,
}

impl RasterRenderer {
    pub const DEFAULT_DPI: f64 = 150.0;

    pub fn new(dpi: f64) -> Self {
        Self {
            dpi,
            width_px: 0,
            height_px: 0,
            current: None,
            pages: Vec::new(),
            glyphs: GlyphCache::default(),
            truetype: None,
        }
    }

    /// Draw glyphs from `faces` instead of the bitmap font.
    pub fn with_truetype(mut self, faces: TrueTypeMetrics) -> Self {
        self.truetype = Some(faces);
        self
    }

    /// Pixels per point.
    #[inline]
    fn scale(&self) -> f64 {
        self.dpi / POINTS_PER_INCH
    }

    /// Finished pages, in order.
    pub fn pages(&self) -> &[GrayImage] {
        &self.pages
    }

    fn set_pixel(&mut self, x: i64, y: i64) {
        let Some(page) = self.current.as_mut() else {
            return;
        };
        if x < 0 || y < 0 || x >= page.width() as i64 || y >= page.height() as i64 {
            return;
        }
        page.put_pixel(x as u32, y as u32, INK);
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let (px0, py0) = (x0.floor() as i64, y0.floor() as i64);
        // At least one pixel per dot, whatever the resolution.
        let px1 = (x1.ceil() as i64).max(px0 + 1);
        let py1 = (y1.ceil() as i64).max(py0 + 1);
        for y in py0..py1 {
            for x in px0..px1 {
                self.set_pixel(x, y);
            }
        }
    }

    fn draw_glyph(&mut self, font: &FontState, at: Point, ch: char, offset_px: i64) {
        let scale = self.scale();
        let cell_w = font.size * CELL_WIDTH_RATIO * font.stretch_x * scale;
        let cell_h = font.size * CELL_HEIGHT_RATIO * font.stretch_y * scale;
        let row_h = cell_h / GLYPH_HEIGHT as f64;
        let origin_x = at.x * scale;
        let top = at.y * scale - GLYPH_BASELINE as f64 * row_h;
        let italic = font.is_italic();

        let bitmap = self.glyphs.get(ch).to_vec();
        let (w, h) = (cell_w.ceil() as i64, cell_h.ceil() as i64);
        for dy in 0..h {
            let src_y = ((dy as f64 / cell_h) * GLYPH_HEIGHT as f64) as usize;
            if src_y >= GLYPH_HEIGHT {
                continue;
            }
            let shear = if italic {
                ((GLYPH_BASELINE as f64 * row_h - dy as f64) * ITALIC_SHEAR).round() as i64
            } else {
                0
            };
            for dx in 0..w {
                let src_x = ((dx as f64 / cell_w) * GLYPH_WIDTH as f64) as usize;
                if src_x < GLYPH_WIDTH && bitmap[src_y * GLYPH_WIDTH + src_x] != 0 {
                    self.set_pixel(
                        origin_x as i64 + dx + shear + offset_px,
                        top as i64 + dy,
                    );
                }
            }
        }
    }

    fn draw_outline(&mut self, face: &FontArc, font: &FontState, at: Point, ch: char, offset_px: i64) {
        let scale = self.scale();
        let em = TrueTypeMetrics::scale(face, font.size);
        let px_scale = PxScale {
            x: em.x * (font.stretch_x * scale) as f32,
            y: em.y * (font.stretch_y * scale) as f32,
        };
        let baseline = at.y * scale;
        let glyph = face
            .glyph_id(ch)
            .with_scale_and_position(px_scale, ab_glyph::point((at.x * scale) as f32, baseline as f32));

        // Blank glyphs (space) have no outline.
        let Some(outlined) = face.outline_glyph(glyph) else {
            return;
        };
        let bounds = outlined.px_bounds();
        let italic = font.is_italic();

        outlined.draw(|px, py, coverage| {
            if coverage < COVERAGE_THRESHOLD {
                return;
            }
            let x = bounds.min.x as i64 + px as i64;
            let y = bounds.min.y as i64 + py as i64;
            let shear = if italic {
                ((baseline - y as f64) * ITALIC_SHEAR).round() as i64
            } else {
                0
            };
            self.set_pixel(x + shear + offset_px, y);
        });
    }

    /// Width of the glyph cell in points, used for underlines.
    fn cell_width(&self, font: &FontState, ch: char) -> f64 {
        match &self.truetype {
            Some(faces) => faces.advance(font, ch) * font.stretch_x,
            None => font.size * CELL_WIDTH_RATIO * font.stretch_x,
        }
    }

    /// Encode one page as PNG bytes.
    pub fn encode_png(page: &GrayImage) -> Result<Vec<u8>, DotprintError> {
        let mut png_bytes = Vec::new();
        page.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)?;
        Ok(png_bytes)
    }

    /// Write every finished page as `<stem>-NNN.png` next to `base`.
    ///
    /// `base` may be a directory (pages are named `page-NNN.png`) or a file
    /// path whose stem is reused.
    pub fn save_pages(&self, base: &Path) -> Result<Vec<PathBuf>, DotprintError> {
        let (dir, stem) = if base.is_dir() {
            (base.to_path_buf(), "page".to_string())
        } else {
            let dir = base
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let stem = base
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "page".to_string());
            (dir, stem)
        };

        let mut written = Vec::with_capacity(self.pages.len());
        for (i, page) in self.pages.iter().enumerate() {
            let path = dir.join(format!("{}-{:03}.png", stem, i + 1));
            std::fs::write(&path, Self::encode_png(page)?)?;
            written.push(path);
        }
        Ok(written)
    }
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DPI)
    }
}

impl Renderer for RasterRenderer {
    fn set_page_size(&mut self, width: f64, height: f64) {
        let scale = self.scale();
        self.width_px = (width * scale).round().max(1.0) as u32;
        self.height_px = (height * scale).round().max(1.0) as u32;
    }

    fn begin_page(&mut self) {
        self.current = Some(GrayImage::from_pixel(
            self.width_px,
            self.height_px,
            Luma([PAPER]),
        ));
    }

    fn end_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
    }

    fn place_glyph(&mut self, font: &FontState, at: Point, ch: char) {
        match &self.truetype {
            Some(faces) => {
                let double_strike = font.is_bold() && !faces.has_bold_face();
                let face = faces.face(font).clone();
                self.draw_outline(&face, font, at, ch, 0);
                if double_strike {
                    self.draw_outline(&face, font, at, ch, 1);
                }
            }
            None => {
                self.draw_glyph(font, at, ch, 0);
                if font.is_bold() {
                    self.draw_glyph(font, at, ch, 1);
                }
            }
        }
        if font.underline {
            let scale = self.scale();
            let x0 = at.x * scale;
            let x1 = x0 + self.cell_width(font, ch) * scale;
            let y = at.y * scale + scale;
            self.fill_rect(x0, y, x1, y + scale * 0.5);
        }
    }

    fn stroke_dot(&mut self, at: Point, size: Size) {
        let scale = self.scale();
        self.fill_rect(
            at.x * scale,
            at.y * scale,
            (at.x + size.width) * scale,
            (at.y + size.height) * scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_count(page: &GrayImage) -> usize {
        page.pixels().filter(|p| p.0[0] == 0).count()
    }

    fn blank_page(dpi: f64) -> RasterRenderer {
        let mut r = RasterRenderer::new(dpi);
        r.set_page_size(72.0, 72.0);
        r.begin_page();
        r
    }

    #[test]
    fn test_page_size_in_pixels() {
        let mut r = blank_page(144.0);
        r.end_page();
        assert_eq!(r.pages()[0].dimensions(), (144, 144));
        assert_eq!(ink_count(&r.pages()[0]), 0);
    }

    #[test]
    fn test_glyph_leaves_ink() {
        let mut r = blank_page(144.0);
        r.place_glyph(&FontState::new("Courier New", 12.0), Point::new(10.0, 30.0), 'M');
        r.end_page();
        assert!(ink_count(&r.pages()[0]) > 0);
    }

    #[test]
    fn test_bold_has_more_ink() {
        let mut plain = blank_page(144.0);
        let mut bold = blank_page(144.0);
        let mut font = FontState::new("Courier New", 12.0);
        plain.place_glyph(&font, Point::new(10.0, 30.0), 'l');
        font.weight = crate::font::FontWeight::Bold;
        bold.place_glyph(&font, Point::new(10.0, 30.0), 'l');
        plain.end_page();
        bold.end_page();
        assert!(ink_count(&bold.pages()[0]) > ink_count(&plain.pages()[0]));
    }

    #[test]
    fn test_dot_is_at_least_one_pixel() {
        let mut r = blank_page(72.0);
        r.stroke_dot(Point::new(5.0, 5.0), Size::new(0.1, 0.1));
        r.end_page();
        assert_eq!(ink_count(&r.pages()[0]), 1);
    }

    #[test]
    fn test_drawing_outside_page_is_clipped() {
        let mut r = blank_page(72.0);
        r.stroke_dot(Point::new(-10.0, 500.0), Size::new(2.0, 2.0));
        r.end_page();
        assert_eq!(ink_count(&r.pages()[0]), 0);
    }

    fn dejavu() -> TrueTypeMetrics {
        TrueTypeMetrics::from_bytes(include_bytes!("../../tests/fonts/DejaVuSans.ttf").to_vec())
            .unwrap()
    }

    /// Leftmost and rightmost inked columns.
    fn ink_columns(page: &GrayImage) -> Option<(u32, u32)> {
        let columns: Vec<u32> = page
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == 0)
            .map(|(x, _, _)| x)
            .collect();
        Some((*columns.iter().min()?, *columns.iter().max()?))
    }

    fn render_truetype(metrics: &TrueTypeMetrics, font: &FontState, ch: char) -> GrayImage {
        let mut r = RasterRenderer::new(72.0).with_truetype(metrics.clone());
        r.set_page_size(200.0, 100.0);
        r.begin_page();
        r.place_glyph(font, Point::new(50.0, 60.0), ch);
        r.end_page();
        r.pages()[0].clone()
    }

    #[test]
    fn test_truetype_ink_stays_within_advance() {
        let metrics = dejavu();
        let font = FontState::new("DejaVu Sans", 40.0);
        for ch in ['i', 'W', 'm', 'o'] {
            let page = render_truetype(&metrics, &font, ch);
            let (left, right) = ink_columns(&page).unwrap();
            let advance = metrics.advance(&font, ch);
            assert!(left as f64 >= 50.0 - 1.0, "'{}' starts at {}", ch, left);
            assert!(right as f64 <= 50.0 + advance + 1.0, "'{}' ends at {} past advance {}", ch, right, advance);
        }
    }

    #[test]
    fn test_truetype_glyph_width_follows_metrics() {
        let metrics = dejavu();
        let font = FontState::new("DejaVu Sans", 40.0);
        let width = |ch| {
            let (left, right) = ink_columns(&render_truetype(&metrics, &font, ch)).unwrap();
            right - left
        };
        assert!(metrics.advance(&font, 'i') < metrics.advance(&font, 'W'));
        assert!(width('i') < width('W'));
    }

    #[test]
    fn test_truetype_stretch_widens_ink() {
        let metrics = dejavu();
        let mut font = FontState::new("DejaVu Sans", 20.0);
        let (l1, r1) = ink_columns(&render_truetype(&metrics, &font, 'W')).unwrap();
        font.stretch_x = 2.0;
        let (l2, r2) = ink_columns(&render_truetype(&metrics, &font, 'W')).unwrap();
        assert!((r2 - l2) > (r1 - l1) * 3 / 2);
        assert!(r2 as f64 <= 50.0 + metrics.advance(&font, 'W') * 2.0 + 1.0);
    }

    #[test]
    fn test_truetype_space_leaves_no_ink() {
        let page = render_truetype(&dejavu(), &FontState::new("DejaVu Sans", 20.0), ' ');
        assert_eq!(ink_count(&page), 0);
    }

    #[test]
    fn test_truetype_bold_face_replaces_double_strike() {
        let bold_bytes = include_bytes!("../../tests/fonts/DejaVuSans-Bold.ttf").to_vec();
        let with_bold = dejavu().with_bold_bytes(bold_bytes).unwrap();
        let mut font = FontState::new("DejaVu Sans", 40.0);
        font.weight = crate::font::FontWeight::Bold;

        let page = render_truetype(&with_bold, &font, 'W');
        let (_, right) = ink_columns(&page).unwrap();
        assert!(right as f64 <= 50.0 + with_bold.advance(&font, 'W') + 1.0);

        let regular = render_truetype(&dejavu(), &FontState::new("DejaVu Sans", 40.0), 'l');
        let struck = render_truetype(&dejavu(), &font, 'l');
        assert!(ink_count(&struck) > ink_count(&regular));
    }

    #[test]
    fn test_encode_png_signature() {
        let mut r = blank_page(72.0);
        r.end_page();
        let png = RasterRenderer::encode_png(&r.pages()[0]).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
}
