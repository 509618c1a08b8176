//! # Emulator Configuration
//!
//! Everything that varies between printer setups and between the observed
//! behaviours of legacy printer drivers: paper, font, newline handling,
//! expanded-print compensation and the printable byte range.
//!
//! ## Usage
//!
//! ```
//! use dotprint::config::{EmulatorConfig, NewlineMode};
//!
//! let config: EmulatorConfig = serde_json::from_str(r#"{
//!     "page": "letter",
//!     "newlines": "coalesce",
//!     "blank_line_threshold": 9
//! }"#).unwrap();
//!
//! assert_eq!(config.newlines, NewlineMode::Coalesce);
//! assert_eq!(config.font_size, 11.0);
//! ```
//!
//! ## Defaults
//!
//! | Key | Default |
//! |-----|---------|
//! | `page` | `"a4"` |
//! | `landscape` | `false` |
//! | `margin_mm` | `10.0` |
//! | `font_face` | `"Courier New"` |
//! | `font_size` | `11.0` |
//! | `base_stretch` | `[1.08, 1.0]` |
//! | `preprocessor` | `"epson"` |
//! | `codepage` | `"cp437"` |
//! | `newlines` | `"direct"` |
//! | `blank_line_threshold` | `11` |
//! | `expanded` | `"stretch"` |
//! | `printable` | `"legacy"` |
//! | `tab_width` | `8` |

use serde::Deserialize;
use std::path::Path;

use crate::codepage::Codepage;
use crate::error::DotprintError;
use crate::font::FontState;
use crate::layout::DEFAULT_TAB_WIDTH;
use crate::page::{MILLIMETER, Margins, PageGeometry};

/// Which interpreter consumes the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emulation {
    /// ESC/P control language
    #[default]
    Epson,
    /// Plain text: LF starts a new line, FF a new page
    Plain,
}

/// How CR and LF reach the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NewlineMode {
    /// Every CR and LF is applied as it arrives
    #[default]
    Direct,
    /// Runs of CR LF pairs are buffered; long runs become a page break
    Coalesce,
}

/// Compensation used for one-line expanded printing (SO / DC4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandedPrinting {
    /// Double the horizontal stretch
    #[default]
    Stretch,
    /// Print bold and follow every glyph with a space
    BoldWithPadding,
}

/// Which bytes count as printable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintableRange {
    /// `0x15..0x7F` plus HT; everything else is dropped
    #[default]
    Legacy,
    /// Every byte that is not an intercepted control code
    Passthrough,
}

impl PrintableRange {
    pub fn is_printable(self, byte: u8) -> bool {
        match self {
            PrintableRange::Legacy => (21..127).contains(&byte),
            PrintableRange::Passthrough => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmulatorConfig {
    pub page: String,
    pub landscape: bool,
    pub margin_mm: f64,
    pub font_face: String,
    pub font_size: f64,
    /// Horizontal and vertical stretch of normal-width text
    pub base_stretch: [f64; 2],
    pub preprocessor: Emulation,
    pub codepage: Codepage,
    pub newlines: NewlineMode,
    /// CR LF pairs in a row that count as a paper feed to the next page
    pub blank_line_threshold: usize,
    pub expanded: ExpandedPrinting,
    pub printable: PrintableRange,
    pub tab_width: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            page: "a4".to_string(),
            landscape: false,
            margin_mm: 10.0,
            font_face: FontState::DEFAULT_FAMILY.to_string(),
            font_size: FontState::DEFAULT_SIZE,
            base_stretch: [1.08, 1.0],
            preprocessor: Emulation::Epson,
            codepage: Codepage::Cp437,
            newlines: NewlineMode::Direct,
            blank_line_threshold: 11,
            expanded: ExpandedPrinting::Stretch,
            printable: PrintableRange::Legacy,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl EmulatorConfig {
    pub fn from_json(json: &str) -> Result<Self, DotprintError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DotprintError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| DotprintError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), DotprintError> {
        if !(self.font_size > 0.0) {
            return Err(DotprintError::Config(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.base_stretch.iter().any(|s| !(*s > 0.0)) {
            return Err(DotprintError::Config(
                "base_stretch factors must be positive".into(),
            ));
        }
        if self.blank_line_threshold == 0 {
            return Err(DotprintError::Config(
                "blank_line_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the paper size, orientation and margins.
    pub fn page_geometry(&self) -> Result<PageGeometry, DotprintError> {
        let named = PageGeometry::by_name(&self.page).ok_or_else(|| {
            DotprintError::PageSize(format!(
                "unknown page size '{}' (known: {})",
                self.page,
                PageGeometry::names().collect::<Vec<_>>().join(", ")
            ))
        })?;
        let named = if self.landscape { named.landscape() } else { named };
        PageGeometry::new(
            named.width,
            named.height,
            Margins::uniform(self.margin_mm * MILLIMETER),
        )
    }

    /// Initial font, without stretch.
    pub fn font(&self) -> FontState {
        FontState::new(&self.font_face, self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmulatorConfig::default();
        assert_eq!(config.blank_line_threshold, 11);
        assert_eq!(config.tab_width, 8);
        assert_eq!(config.base_stretch, [1.08, 1.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EmulatorConfig::from_json(
            r#"{ "expanded": "bold_with_padding", "printable": "passthrough" }"#,
        )
        .unwrap();
        assert_eq!(config.expanded, ExpandedPrinting::BoldWithPadding);
        assert_eq!(config.printable, PrintableRange::Passthrough);
        assert_eq!(config.page, "a4");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = EmulatorConfig::from_json(r#"{ "colour": "red" }"#);
        assert!(matches!(result, Err(DotprintError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EmulatorConfig::from_json(r#"{ "font_size": 0 }"#).is_err());
        assert!(EmulatorConfig::from_json(r#"{ "blank_line_threshold": 0 }"#).is_err());
        assert!(EmulatorConfig::from_json(r#"{ "base_stretch": [1.0, -1.0] }"#).is_err());
    }

    #[test]
    fn test_page_geometry_landscape() {
        let config = EmulatorConfig {
            page: "Letter".into(),
            landscape: true,
            ..Default::default()
        };
        let page = config.page_geometry().unwrap();
        assert_eq!((page.width, page.height), (792.0, 612.0));
    }

    #[test]
    fn test_unknown_page() {
        let config = EmulatorConfig {
            page: "b5".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.page_geometry(),
            Err(DotprintError::PageSize(_))
        ));
    }

    #[test]
    fn test_legacy_printable_range() {
        let range = PrintableRange::Legacy;
        assert!(range.is_printable(b'A'));
        assert!(range.is_printable(0x15));
        assert!(!range.is_printable(0x14));
        assert!(!range.is_printable(0x7F));
        assert!(!range.is_printable(0xA4));
        assert!(PrintableRange::Passthrough.is_printable(0xA4));
    }
}
