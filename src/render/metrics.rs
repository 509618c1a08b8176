//! Glyph metrics providers.
//!
//! [`FixedPitchMetrics`] approximates the Courier family every dot-matrix
//! printer imitates. [`TrueTypeMetrics`] reads real advances from a font
//! file with `ab_glyph`.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use std::path::Path;

use super::GlyphMetrics;
use crate::error::DotprintError;
use crate::font::FontState;

/// Fixed-pitch metrics: every char advances the same fraction of the size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchMetrics {
    /// Advance as a fraction of the font size
    pub advance_ratio: f64,
    /// Line height as a fraction of the font size
    pub height_ratio: f64,
}

impl FixedPitchMetrics {
    /// Courier New: 0.6 em advance, 1.133 em line height.
    pub const COURIER: Self = Self {
        advance_ratio: 0.6,
        height_ratio: 1.133,
    };
}

impl Default for FixedPitchMetrics {
    fn default() -> Self {
        Self::COURIER
    }
}

impl GlyphMetrics for FixedPitchMetrics {
    fn advance(&self, font: &FontState, _ch: char) -> f64 {
        font.size * self.advance_ratio
    }

    fn line_height(&self, font: &FontState) -> f64 {
        font.size * self.height_ratio
    }
}

/// Metrics from a TrueType/OpenType font.
///
/// A separate bold face is used for bold text when one was loaded.
#[derive(Clone)]
pub struct TrueTypeMetrics {
    regular: FontArc,
    bold: Option<FontArc>,
}

impl TrueTypeMetrics {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, DotprintError> {
        let regular = FontArc::try_from_vec(data)
            .map_err(|e| DotprintError::Font(format!("invalid font data: {}", e)))?;
        Ok(Self {
            regular,
            bold: None,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, DotprintError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
            .map_err(|e| DotprintError::Font(format!("{}: {}", path.display(), e)))
    }

    /// Attach a bold face.
    pub fn with_bold_bytes(mut self, data: Vec<u8>) -> Result<Self, DotprintError> {
        let bold = FontArc::try_from_vec(data)
            .map_err(|e| DotprintError::Font(format!("invalid font data: {}", e)))?;
        self.bold = Some(bold);
        Ok(self)
    }

    pub fn with_bold_file(self, path: &Path) -> Result<Self, DotprintError> {
        let data = std::fs::read(path)?;
        self.with_bold_bytes(data)
            .map_err(|e| DotprintError::Font(format!("{}: {}", path.display(), e)))
    }

    pub fn has_bold_face(&self) -> bool {
        self.bold.is_some()
    }

    /// The face that draws `font`: the bold face for bold text when loaded.
    pub(super) fn face(&self, font: &FontState) -> &FontArc {
        match (&self.bold, font.is_bold()) {
            (Some(bold), true) => bold,
            _ => &self.regular,
        }
    }

    /// `ab_glyph` scales so that ascent - descent equals the scale; convert
    /// the point size (an em size) into that unit.
    pub(super) fn scale(face: &FontArc, size: f64) -> PxScale {
        let units_per_em = face.units_per_em().unwrap_or(1000.0);
        PxScale::from(size as f32 * face.height_unscaled() / units_per_em)
    }
}

impl GlyphMetrics for TrueTypeMetrics {
    fn advance(&self, font: &FontState, ch: char) -> f64 {
        let face = self.face(font);
        let scaled = face.as_scaled(Self::scale(face, font.size));
        scaled.h_advance(face.glyph_id(ch)) as f64
    }

    fn line_height(&self, font: &FontState) -> f64 {
        let face = self.face(font);
        let scaled = face.as_scaled(Self::scale(face, font.size));
        (scaled.height() + scaled.line_gap()) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pitch_scales_with_size() {
        let m = FixedPitchMetrics::COURIER;
        let font = FontState::new("Courier New", 10.0);
        assert!((m.advance(&font, 'W') - 6.0).abs() < 1e-9);
        assert!((m.advance(&font, 'i') - 6.0).abs() < 1e-9);
        assert!((m.line_height(&font) - 11.33).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_pitch_ignores_stretch() {
        let m = FixedPitchMetrics::default();
        let mut font = FontState::new("Courier New", 10.0);
        font.stretch_x = 2.0;
        assert!((m.advance(&font, 'A') - 6.0).abs() < 1e-9);
    }

    fn dejavu() -> TrueTypeMetrics {
        TrueTypeMetrics::from_bytes(include_bytes!("../../tests/fonts/DejaVuSans.ttf").to_vec())
            .unwrap()
    }

    #[test]
    fn test_truetype_advances_are_proportional() {
        let m = dejavu();
        let font = FontState::new("DejaVu Sans", 10.0);
        let narrow = m.advance(&font, 'i');
        let wide = m.advance(&font, 'W');
        assert!(narrow > 2.0 && narrow < 3.5, "'i' advance {}", narrow);
        assert!(wide > 9.0 && wide < 10.5, "'W' advance {}", wide);
    }

    #[test]
    fn test_truetype_advance_scales_with_size() {
        let m = dejavu();
        let small = m.advance(&FontState::new("DejaVu Sans", 10.0), 'M');
        let large = m.advance(&FontState::new("DejaVu Sans", 20.0), 'M');
        assert!((large - 2.0 * small).abs() < 0.01);
    }

    #[test]
    fn test_truetype_line_height() {
        let m = dejavu();
        let font = FontState::new("DejaVu Sans", 10.0);
        let height = m.line_height(&font);
        // DejaVu Sans: ascent 1901, descent -483, no line gap, 2048 units/em.
        assert!((height - 10.0 * 2384.0 / 2048.0).abs() < 0.05, "line height {}", height);
    }

    #[test]
    fn test_bold_face_used_for_bold_text() {
        let bold_bytes = include_bytes!("../../tests/fonts/DejaVuSans-Bold.ttf").to_vec();
        let m = dejavu().with_bold_bytes(bold_bytes.clone()).unwrap();
        let bold_only = TrueTypeMetrics::from_bytes(bold_bytes).unwrap();
        assert!(m.has_bold_face());

        let mut font = FontState::new("DejaVu Sans", 10.0);
        let regular = m.advance(&font, 'W');
        font.weight = crate::font::FontWeight::Bold;
        assert_eq!(m.advance(&font, 'W'), bold_only.advance(&font, 'W'));
        assert!(m.advance(&font, 'W') > regular);
    }

    #[test]
    fn test_bold_text_without_bold_face_uses_regular() {
        let m = dejavu();
        let mut font = FontState::new("DejaVu Sans", 10.0);
        let regular = m.advance(&font, 'W');
        font.weight = crate::font::FontWeight::Bold;
        assert_eq!(m.advance(&font, 'W'), regular);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = TrueTypeMetrics::from_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(DotprintError::Font(_))));
        let result = dejavu().with_bold_bytes(vec![0; 16]);
        assert!(matches!(result, Err(DotprintError::Font(_))));
    }
}
