//! # ESC/P Interpreter
//!
//! Decodes a dot-matrix printer byte stream into [`Layout`] operations.
//!
//! ## Architecture
//!
//! ```text
//! byte → EscapeInterpreter::process
//!          ├─ Normal: printable → codepage → Layout::print_char
//!          │          CR / LF   → NewlinePolicy (direct or coalescing)
//!          │          FF, SO, DC4, SI, DC2, HT → layout / font-size state
//!          │          ESC       → Escape(AwaitingCommandByte)
//!          └─ Escape: command table lookup
//!                     ├─ no parameters       → apply
//!                     ├─ fixed / terminated  → collect, then apply
//!                     └─ ESC *               → GraphicsAssembler → Layout::append_graphics
//! ```
//!
//! Nothing in the input can stop the interpreter: unknown commands are
//! logged and the next byte is read in normal mode, unknown control bytes
//! and untranslatable characters are dropped.
//!
//! ## Example
//!
//! ```
//! use dotprint::config::EmulatorConfig;
//! use dotprint::document::Document;
//! use dotprint::render::{FixedPitchMetrics, RecordingRenderer};
//!
//! let config = EmulatorConfig::default();
//! let mut doc = Document::new(
//!     RecordingRenderer::new(),
//!     FixedPitchMetrics::COURIER,
//!     &config,
//! ).unwrap();
//! doc.feed_all(b"\x1bEBold\x1bF plain\r\n");
//! let renderer = doc.finish();
//! assert_eq!(renderer.text(), "Bold plain");
//! ```

pub mod commands;
pub mod graphics;
pub mod newline;
pub mod plain;

pub use commands::{Command, Continuation};
pub use graphics::{Feed, GraphicsAssembler};
pub use newline::{Coalescer, NewlinePolicy};
pub use plain::PlainInterpreter;

use crate::codepage::CodepageTranslator;
use crate::config::{EmulatorConfig, ExpandedPrinting, PrintableRange};
use crate::font::{FontSlant, FontWeight};
use crate::layout::{DEFAULT_TAB_WIDTH, Layout};
use commands::{CR, DC2, DC4, ESC, FF, HT, LF, SI, SO};

/// Upper bound on stored bytes of a terminated parameter list. Extra bytes
/// are still consumed up to the terminator.
const MAX_TERMINATED_PARAMS: usize = 32;

/// Interface shared by the stream interpreters.
pub trait Preprocessor {
    /// Called once before the first byte.
    fn start(&mut self, _layout: &mut dyn Layout) {}

    /// Consume one byte.
    fn process(&mut self, layout: &mut dyn Layout, byte: u8);

    /// Called once after the last byte.
    fn finish(&mut self, _layout: &mut dyn Layout) {}
}

/// Character width mode set by the single-byte controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    #[default]
    Normal,
    /// SO until DC4 or the next LF
    SingleLineExpanded,
    /// SI until DC2
    Condensed,
}

#[derive(Debug)]
enum InputMode {
    Normal,
    Escape(SubState),
}

/// Multi-byte command being assembled.
#[derive(Debug)]
enum SubState {
    AwaitingCommandByte,
    Parameters {
        command: Command,
        remaining: usize,
        params: Vec<u8>,
    },
    Terminated {
        command: Command,
        terminator: u8,
        params: Vec<u8>,
    },
    DrawGraphics(GraphicsAssembler),
}

/// ESC/P stream interpreter.
pub struct EscapeInterpreter {
    translator: Box<dyn CodepageTranslator>,
    mode: InputMode,
    newlines: NewlinePolicy,
    font_size: FontSize,
    /// Bold requested by ESC E / ESC F
    bold: bool,
    expanded: ExpandedPrinting,
    printable: PrintableRange,
    base_stretch: (f64, f64),
    default_tab_width: usize,
}

impl EscapeInterpreter {
    pub fn new(translator: Box<dyn CodepageTranslator>, newlines: NewlinePolicy) -> Self {
        Self {
            translator,
            mode: InputMode::Normal,
            newlines,
            font_size: FontSize::Normal,
            bold: false,
            expanded: ExpandedPrinting::Stretch,
            printable: PrintableRange::Legacy,
            base_stretch: (1.08, 1.0),
            default_tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn from_config(config: &EmulatorConfig) -> Self {
        Self::new(
            config.codepage.translator(),
            NewlinePolicy::new(config.newlines, config.blank_line_threshold),
        )
        .with_expanded_printing(config.expanded)
        .with_printable_range(config.printable)
        .with_base_stretch(config.base_stretch[0], config.base_stretch[1])
        .with_tab_width(config.tab_width)
    }

    pub fn with_expanded_printing(mut self, expanded: ExpandedPrinting) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_printable_range(mut self, printable: PrintableRange) -> Self {
        self.printable = printable;
        self
    }

    pub fn with_base_stretch(mut self, stretch_x: f64, stretch_y: f64) -> Self {
        self.base_stretch = (stretch_x, stretch_y);
        self
    }

    pub fn with_tab_width(mut self, spaces: usize) -> Self {
        self.default_tab_width = spaces;
        self
    }

    /// True when the next byte is read as text or a control code.
    pub fn is_normal(&self) -> bool {
        matches!(self.mode, InputMode::Normal)
    }

    /// The command whose parameters are being collected, if any.
    pub fn pending_command(&self) -> Option<Command> {
        match &self.mode {
            InputMode::Escape(SubState::Parameters { command, .. })
            | InputMode::Escape(SubState::Terminated { command, .. }) => Some(*command),
            InputMode::Escape(SubState::DrawGraphics(_)) => Some(Command::DrawGraphics),
            _ => None,
        }
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    fn process_normal(&mut self, layout: &mut dyn Layout, byte: u8) {
        match byte {
            CR => return self.newlines.on_cr(layout),
            LF => {
                if self.font_size == FontSize::SingleLineExpanded {
                    self.set_font_size(layout, FontSize::Normal);
                }
                return self.newlines.on_lf(layout);
            }
            _ => self.newlines.before_other(layout),
        }

        match byte {
            FF => layout.new_page(),
            ESC => self.mode = InputMode::Escape(SubState::AwaitingCommandByte),
            SO => self.set_font_size(layout, FontSize::SingleLineExpanded),
            DC4 | DC2 => self.set_font_size(layout, FontSize::Normal),
            SI => self.set_font_size(layout, FontSize::Condensed),
            HT => layout.print_tab(),
            b if self.printable.is_printable(b) => match self.translator.translate(b) {
                Some(ch) => {
                    layout.print_char(ch);
                    if self.padding_active() {
                        layout.print_char(' ');
                    }
                }
                None => log::debug!("dropping untranslatable byte 0x{:02X}", b),
            },
            b => log::debug!("dropping control byte 0x{:02X}", b),
        }
    }

    fn process_escape(&mut self, layout: &mut dyn Layout, state: SubState, byte: u8) {
        match state {
            SubState::AwaitingCommandByte => self.begin_command(layout, byte),

            SubState::Parameters {
                command,
                remaining,
                mut params,
            } => {
                params.push(byte);
                if remaining <= 1 {
                    self.complete(layout, command, &params);
                } else {
                    self.mode = InputMode::Escape(SubState::Parameters {
                        command,
                        remaining: remaining - 1,
                        params,
                    });
                }
            }

            SubState::Terminated {
                command,
                terminator,
                mut params,
            } => {
                if byte == terminator {
                    self.complete(layout, command, &params);
                } else {
                    if params.len() < MAX_TERMINATED_PARAMS {
                        params.push(byte);
                    }
                    self.mode = InputMode::Escape(SubState::Terminated {
                        command,
                        terminator,
                        params,
                    });
                }
            }

            SubState::DrawGraphics(mut assembler) => match assembler.feed(byte) {
                Feed::Pending => self.mode = InputMode::Escape(SubState::DrawGraphics(assembler)),
                Feed::Completed(pixmap) => {
                    layout.append_graphics(&pixmap);
                    layout.use_current_font();
                }
            },
        }
    }

    fn begin_command(&mut self, layout: &mut dyn Layout, byte: u8) {
        let Some(command) = commands::lookup(byte) else {
            log::warn!("ignoring unknown escape ESC 0x{:02X}", byte);
            return;
        };
        log::debug!("ESC 0x{:02X} ({:?})", byte, command);

        match command.continuation() {
            Continuation::None | Continuation::Fixed(0) => self.complete(layout, command, &[]),
            Continuation::Fixed(n) => {
                self.mode = InputMode::Escape(SubState::Parameters {
                    command,
                    remaining: n,
                    params: Vec::with_capacity(n),
                });
            }
            Continuation::Terminated(terminator) => {
                self.mode = InputMode::Escape(SubState::Terminated {
                    command,
                    terminator,
                    params: Vec::new(),
                });
            }
            Continuation::Delegated => {
                self.mode = InputMode::Escape(SubState::DrawGraphics(GraphicsAssembler::new()));
            }
        }
    }

    /// Apply a fully received command and return to normal mode.
    fn complete(&mut self, layout: &mut dyn Layout, command: Command, params: &[u8]) {
        match command {
            Command::BoldOn => {
                self.bold = true;
                layout.set_font_weight(self.effective_weight());
            }
            Command::BoldOff => {
                self.bold = false;
                layout.set_font_weight(self.effective_weight());
            }
            Command::ItalicOn => layout.set_font_slant(FontSlant::Italic),
            Command::ItalicOff => layout.set_font_slant(FontSlant::Normal),
            Command::Initialize => self.initialize(layout),
            Command::EighthInchSpacing => layout.set_line_spacing(1.0 / 8.0),
            Command::SixthInchSpacing => layout.set_line_spacing(1.0 / 6.0),
            Command::Underline => {
                let on = !matches!(params.first(), Some(0) | Some(b'0') | None);
                layout.set_underline(on);
            }
            Command::SetLineSpacing => {
                let n = params.first().copied().unwrap_or(0);
                layout.set_line_spacing(n as f64 / 180.0);
            }
            Command::SetTabWidth => match params.iter().find(|&&n| n != 0) {
                Some(&first_stop) => layout.set_tab_width(first_stop as usize),
                None => layout.set_tab_width(self.default_tab_width),
            },
            Command::SelectQuality => log::debug!("ignoring print quality {:?}", params),
            Command::DrawGraphics => {
                unreachable!("graphics blocks complete through the assembler")
            }
        }
        layout.use_current_font();
    }

    /// Power-on state: ESC @ and stream start.
    fn initialize(&mut self, layout: &mut dyn Layout) {
        self.bold = false;
        layout.set_font_slant(FontSlant::Normal);
        layout.set_underline(false);
        self.set_font_size(layout, FontSize::Normal);
        layout.reset_line_spacing();
        layout.set_tab_width(self.default_tab_width);
    }

    fn set_font_size(&mut self, layout: &mut dyn Layout, size: FontSize) {
        self.font_size = size;
        let (base_x, base_y) = self.base_stretch;
        let stretch_x = match size {
            FontSize::Condensed => base_x * 10.0 / 17.0,
            FontSize::SingleLineExpanded if self.expanded == ExpandedPrinting::Stretch => {
                base_x * 2.0
            }
            _ => base_x,
        };
        layout.stretch_font(stretch_x, base_y);
        layout.set_font_weight(self.effective_weight());
        layout.use_current_font();
    }

    fn padding_active(&self) -> bool {
        self.font_size == FontSize::SingleLineExpanded
            && self.expanded == ExpandedPrinting::BoldWithPadding
    }

    fn effective_weight(&self) -> FontWeight {
        if self.bold || self.padding_active() {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }
}

impl Preprocessor for EscapeInterpreter {
    fn start(&mut self, layout: &mut dyn Layout) {
        self.initialize(layout);
    }

    fn process(&mut self, layout: &mut dyn Layout, byte: u8) {
        match std::mem::replace(&mut self.mode, InputMode::Normal) {
            InputMode::Normal => self.process_normal(layout, byte),
            InputMode::Escape(state) => self.process_escape(layout, state, byte),
        }
    }

    fn finish(&mut self, layout: &mut dyn Layout) {
        match std::mem::replace(&mut self.mode, InputMode::Normal) {
            InputMode::Escape(SubState::DrawGraphics(assembler)) => log::warn!(
                "stream ended inside a graphics block ({} of {} columns), discarded",
                assembler.bytes_consumed().saturating_sub(graphics::HEADER_LEN)
                    / graphics::BYTES_PER_COLUMN,
                assembler.expected_columns()
            ),
            InputMode::Escape(state) => log::debug!("stream ended inside escape {:?}", state),
            InputMode::Normal => {}
        }
        self.newlines.before_other(layout);
    }
}
