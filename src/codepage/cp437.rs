//! # Code Page 437
//!
//! Decodes IBM PC Code Page 437, the default character set of Epson-style
//! dot-matrix printers. 0x20–0x7E is ASCII; the control range and the upper
//! half map to the PC graphics characters. 0x00 has no glyph.

use super::CodepageTranslator;

/// CP437 decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cp437;

impl CodepageTranslator for Cp437 {
    fn translate(&self, byte: u8) -> Option<char> {
        match byte {
            0x00 => None,
            0x01..=0x1F => Some(LOW[(byte - 0x01) as usize]),
            0x20..=0x7E => Some(byte as char),
            0x7F => Some('⌂'),
            0x80..=0xFF => Some(HIGH[(byte - 0x80) as usize]),
        }
    }
}

/// 0x01–0x1F: symbols printed for control codes.
const LOW: [char; 31] = [
    '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼', // 0x01–0x0F
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼', // 0x10–0x1F
];

/// 0x80–0xFF.
const HIGH: [char; 128] = [
    // 0x80–0x8F: accented letters
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90–0x9F: more accented, currency, ƒ
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0–0xAF: Spanish, fractions, punctuation
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0–0xBF: shades and box drawing
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0–0xCF
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0–0xDF: box drawing, block elements
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0–0xEF: Greek and math
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0–0xFF: math symbols, degree, nbsp
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];
