//! # Dotprint - ESC/P Printer Stream Emulator
//!
//! Dotprint turns the byte stream a legacy application sends to a 24-pin
//! Epson-compatible dot-matrix printer into rendered pages. It provides:
//!
//! - **Interpreter**: an ESC/P state machine that never fails on bad input
//! - **Newline coalescing**: long CR LF runs become page breaks
//! - **Page layout**: cursor, wrapping, line spacing and page breaks
//! - **Graphics**: 24-dot column bit images (`ESC *`)
//! - **Rendering**: grayscale PNG pages, or a call recorder for testing
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotprint::{
//!     config::EmulatorConfig,
//!     document::Document,
//!     render::{FixedPitchMetrics, RasterRenderer},
//! };
//!
//! let data = std::fs::read("job.prn")?;
//! let config = EmulatorConfig::default();
//!
//! let mut doc = Document::new(
//!     RasterRenderer::new(RasterRenderer::DEFAULT_DPI),
//!     FixedPitchMetrics::COURIER,
//!     &config,
//! )?;
//! doc.feed_all(&data);
//!
//! let renderer = doc.finish();
//! renderer.save_pages(std::path::Path::new("job.png"))?;
//!
//! # Ok::<(), dotprint::DotprintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`escp`] | ESC/P and plain-text interpreters, newline policy, bit images |
//! | [`layout`] | Page layout engine |
//! | [`render`] | Renderer and glyph metrics interfaces, PNG and recording renderers |
//! | [`codepage`] | Byte to character translation |
//! | [`config`] | Emulator configuration |
//! | [`document`] | Interpreter and layout wired together |
//! | [`error`] | Error types |

pub mod codepage;
pub mod config;
pub mod document;
pub mod error;
pub mod escp;
pub mod font;
pub mod layout;
pub mod page;
pub mod pixmap;
pub mod render;

// Re-exports for convenience
pub use config::EmulatorConfig;
pub use document::Document;
pub use error::DotprintError;
pub use escp::{EscapeInterpreter, Preprocessor};
pub use layout::{Layout, PageLayoutEngine};
pub use page::PageGeometry;
pub use pixmap::Pixmap;
