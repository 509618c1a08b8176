//! Bitmap glyphs for the raster renderer.
//!
//! Uses the Spleen 12×24 bitmap font; missing glyphs become a box outline.

use spleen_font::{FONT_12X24, PSF2Font};
use std::collections::HashMap;

pub(super) const GLYPH_WIDTH: usize = 12;
pub(super) const GLYPH_HEIGHT: usize = 24;

/// Baseline row within the 24-row cell.
pub(super) const GLYPH_BASELINE: usize = 19;

/// Glyph bitmaps keyed by char. Each bitmap is `GLYPH_WIDTH * GLYPH_HEIGHT`
/// bytes, 1 = ink.
#[derive(Default)]
pub(super) struct GlyphCache {
    glyphs: HashMap<char, Vec<u8>>,
}

impl GlyphCache {
    pub(super) fn get(&mut self, ch: char) -> &[u8] {
        self.glyphs.entry(ch).or_insert_with(|| generate_glyph(ch))
    }
}

/// Rasterize one char from Spleen.
fn generate_glyph(ch: char) -> Vec<u8> {
    let mut glyph = vec![0u8; GLYPH_WIDTH * GLYPH_HEIGHT];
    if ch == ' ' {
        return glyph;
    }

    let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
        draw_box(&mut glyph);
        return glyph;
    };
    let utf8 = ch.to_string();

    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(rows) => {
            for (row_y, row) in rows.enumerate() {
                for (col_x, on) in row.enumerate() {
                    let idx = row_y * GLYPH_WIDTH + col_x;
                    if col_x < GLYPH_WIDTH && idx < glyph.len() {
                        glyph[idx] = on as u8;
                    }
                }
            }
        }
        None => draw_box(&mut glyph),
    }

    glyph
}

fn draw_box(glyph: &mut [u8]) {
    for x in 0..GLYPH_WIDTH {
        glyph[2 * GLYPH_WIDTH + x] = 1;
        glyph[GLYPH_BASELINE * GLYPH_WIDTH + x] = 1;
    }
    for y in 2..=GLYPH_BASELINE {
        glyph[y * GLYPH_WIDTH] = 1;
        glyph[y * GLYPH_WIDTH + GLYPH_WIDTH - 1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_has_ink() {
        let mut cache = GlyphCache::default();
        assert!(cache.get('A').iter().any(|&p| p != 0));
    }

    #[test]
    fn test_space_is_blank() {
        let mut cache = GlyphCache::default();
        assert!(cache.get(' ').iter().all(|&p| p == 0));
    }

    #[test]
    fn test_glyph_dimensions() {
        let mut cache = GlyphCache::default();
        assert_eq!(cache.get('x').len(), GLYPH_WIDTH * GLYPH_HEIGHT);
    }
}
