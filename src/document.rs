//! # Document
//!
//! Ties a [`Preprocessor`] to a [`PageLayoutEngine`]: bytes in, renderer
//! calls out.
//!
//! ```
//! use dotprint::config::EmulatorConfig;
//! use dotprint::document::Document;
//! use dotprint::render::{FixedPitchMetrics, RecordingRenderer};
//!
//! let mut doc = Document::new(
//!     RecordingRenderer::new(),
//!     FixedPitchMetrics::COURIER,
//!     &EmulatorConfig::default(),
//! )?;
//! doc.feed_all(b"page one\x0cpage two");
//! assert_eq!(doc.page_count(), 2);
//! let renderer = doc.finish();
//! assert_eq!(renderer.page_count(), 2);
//! # Ok::<(), dotprint::DotprintError>(())
//! ```

use crate::config::{Emulation, EmulatorConfig};
use crate::error::DotprintError;
use crate::escp::{EscapeInterpreter, PlainInterpreter, Preprocessor};
use crate::font::FontState;
use crate::layout::{Layout, PageLayoutEngine};
use crate::page::PageGeometry;
use crate::render::{GlyphMetrics, Renderer};

pub struct Document<R, M> {
    layout: PageLayoutEngine<R, M>,
    preprocessor: Box<dyn Preprocessor>,
}

impl<R: Renderer, M: GlyphMetrics> Document<R, M> {
    /// Build the layout and interpreter described by `config`.
    pub fn new(renderer: R, metrics: M, config: &EmulatorConfig) -> Result<Self, DotprintError> {
        config.validate()?;
        let page = config.page_geometry()?;

        let mut font = config.font();
        font.stretch_x = config.base_stretch[0];
        font.stretch_y = config.base_stretch[1];

        let preprocessor: Box<dyn Preprocessor> = match config.preprocessor {
            Emulation::Epson => Box::new(EscapeInterpreter::from_config(config)),
            Emulation::Plain => Box::new(PlainInterpreter::new(config.codepage.translator())),
        };

        let mut doc = Self::with_preprocessor(renderer, metrics, page, font, preprocessor);
        doc.layout.set_tab_width(config.tab_width);
        Ok(doc)
    }

    /// Build around an explicit interpreter.
    pub fn with_preprocessor(
        renderer: R,
        metrics: M,
        page: PageGeometry,
        font: FontState,
        mut preprocessor: Box<dyn Preprocessor>,
    ) -> Self {
        let mut layout = PageLayoutEngine::new(renderer, metrics, page, font);
        preprocessor.start(&mut layout);
        Self {
            layout,
            preprocessor,
        }
    }

    pub fn feed(&mut self, byte: u8) {
        self.preprocessor.process(&mut self.layout, byte);
    }

    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    pub fn layout(&self) -> &PageLayoutEngine<R, M> {
        &self.layout
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    /// Flush buffered input, end the last page and return the renderer.
    pub fn finish(mut self) -> R {
        self.preprocessor.finish(&mut self.layout);
        log::trace!("document finished with {} pages", self.layout.page_count());
        self.layout.finish()
    }
}
