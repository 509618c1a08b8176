//! # Codepage Translation
//!
//! Maps the printer's 8-bit character codes to Unicode.
//!
//! | Translator | Range |
//! |------------|-------|
//! | [`Ascii`] | 0x20–0x7E |
//! | [`Cp437`] | 0x01–0xFF (IBM PC graphics in the control range) |
//!
//! A byte without a mapping is dropped by the interpreters.

pub mod cp437;

pub use cp437::Cp437;

use serde::Deserialize;

/// Byte-to-codepoint table.
pub trait CodepageTranslator {
    /// The char for `byte`, or `None` if the byte is untranslatable.
    fn translate(&self, byte: u8) -> Option<char>;
}

/// Printable 7-bit ASCII only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii;

impl CodepageTranslator for Ascii {
    fn translate(&self, byte: u8) -> Option<char> {
        (0x20..0x7F).contains(&byte).then_some(byte as char)
    }
}

/// Named translators, for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Codepage {
    #[default]
    Cp437,
    Ascii,
}

impl Codepage {
    pub fn translator(self) -> Box<dyn CodepageTranslator> {
        match self {
            Codepage::Cp437 => Box::new(Cp437),
            Codepage::Ascii => Box::new(Ascii),
        }
    }
}
