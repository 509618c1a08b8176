//! # Page Geometry
//!
//! Paper sizes and margins. All lengths are PostScript points (1/72 inch).
//!
//! ## Supported Paper Sizes
//!
//! | Name | Width (pt) | Height (pt) |
//! |--------|-----------|-------------|
//! | A3 | 841.89 | 1190.55 |
//! | A4 | 595.28 | 841.89 |
//! | A5 | 419.53 | 595.28 |
//! | Letter | 612 | 792 |
//! | Legal | 612 | 1008 |
//!
//! ## Usage
//!
//! ```
//! use dotprint::page::PageGeometry;
//!
//! let page = PageGeometry::by_name("a4").unwrap().landscape();
//! assert!(page.width > page.height);
//! ```

use crate::error::DotprintError;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter.
pub const MILLIMETER: f64 = POINTS_PER_INCH / 25.4;

/// Margins around the printable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    /// The same margin on every side.
    pub const fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(10.0 * MILLIMETER)
    }
}

/// Page dimensions plus margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

/// Named paper sizes, `(name, width, height)` in points, portrait.
const PAPER_SIZES: &[(&str, f64, f64)] = &[
    ("a3", 297.0 * MILLIMETER, 420.0 * MILLIMETER),
    ("a4", 210.0 * MILLIMETER, 297.0 * MILLIMETER),
    ("a5", 148.0 * MILLIMETER, 210.0 * MILLIMETER),
    ("letter", 612.0, 792.0),
    ("legal", 612.0, 1008.0),
];

impl PageGeometry {
    /// A4 portrait with default margins.
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MILLIMETER,
            height: 297.0 * MILLIMETER,
            margins: Margins::default(),
        }
    }

    /// Build a geometry, rejecting non-positive sizes and margins that leave
    /// no printable area.
    pub fn new(width: f64, height: f64, margins: Margins) -> Result<Self, DotprintError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(DotprintError::PageSize(format!(
                "page must have positive dimensions, got {}x{}",
                width, height
            )));
        }
        let m = margins;
        if [m.top, m.bottom, m.left, m.right].iter().any(|v| *v < 0.0) {
            return Err(DotprintError::PageSize("margins must not be negative".into()));
        }
        if m.left + m.right >= width || m.top + m.bottom >= height {
            return Err(DotprintError::PageSize(
                "margins leave no printable area".into(),
            ));
        }
        Ok(Self {
            width,
            height,
            margins,
        })
    }

    /// Look up a named paper size (case-insensitive) with default margins.
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        PAPER_SIZES
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, width, height)| Self {
                width,
                height,
                margins: Margins::default(),
            })
    }

    /// Names accepted by [`PageGeometry::by_name`].
    pub fn names() -> impl Iterator<Item = &'static str> {
        PAPER_SIZES.iter().map(|(n, _, _)| *n)
    }

    /// Swap width and height.
    pub fn landscape(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            margins: self.margins,
        }
    }

    /// Right edge of the printable area, in page coordinates.
    #[inline]
    pub fn right_limit(&self) -> f64 {
        self.width - self.margins.right
    }

    /// Bottom edge of the printable area, in page coordinates.
    #[inline]
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margins.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
