//! # Font State
//!
//! The font attributes the layout engine hands to the metrics provider and
//! the renderer with every glyph.

/// Stroke weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Active font attributes.
///
/// `stretch_x`/`stretch_y` scale glyph placement and horizontal advance; they
/// never affect glyphs already placed.
#[derive(Debug, Clone, PartialEq)]
pub struct FontState {
    /// Font family name (informational for bitmap renderers)
    pub family: String,
    /// Nominal size in points
    pub size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub underline: bool,
    pub stretch_x: f64,
    pub stretch_y: f64,
}

impl FontState {
    pub const DEFAULT_FAMILY: &'static str = "Courier New";
    pub const DEFAULT_SIZE: f64 = 11.0;

    pub fn new(family: &str, size: f64) -> Self {
        Self {
            family: family.to_string(),
            size,
            ..Default::default()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.slant == FontSlant::Italic
    }
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            size: Self::DEFAULT_SIZE,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            underline: false,
            stretch_x: 1.0,
            stretch_y: 1.0,
        }
    }
}
