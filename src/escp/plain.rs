//! Plain text interpretation: no escape sequences.
//!
//! | Byte | Effect |
//! |------|--------|
//! | LF | new line |
//! | FF | new page |
//! | other control bytes | dropped |
//! | anything else | translated and printed |

use super::Preprocessor;
use super::commands::{FF, LF};
use crate::codepage::CodepageTranslator;
use crate::layout::Layout;

pub struct PlainInterpreter {
    translator: Box<dyn CodepageTranslator>,
}

impl PlainInterpreter {
    pub fn new(translator: Box<dyn CodepageTranslator>) -> Self {
        Self { translator }
    }
}

impl Preprocessor for PlainInterpreter {
    fn process(&mut self, layout: &mut dyn Layout, byte: u8) {
        match byte {
            LF => layout.new_line(),
            FF => layout.new_page(),
            b if b < 0x20 || b == 0x7F => log::debug!("dropping control byte 0x{:02X}", b),
            b => match self.translator.translate(b) {
                Some(ch) => layout.print_char(ch),
                None => log::debug!("dropping untranslatable byte 0x{:02X}", b),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepage::{Ascii, Cp437};
    use crate::escp::tests::{Event, MockLayout};
    use pretty_assertions::assert_eq;

    fn run(interp: &mut PlainInterpreter, bytes: &[u8]) -> MockLayout {
        let mut layout = MockLayout::default();
        for &b in bytes {
            interp.process(&mut layout, b);
        }
        layout
    }

    #[test]
    fn test_lines_and_pages() {
        let layout = run(&mut PlainInterpreter::new(Box::new(Cp437)), b"ab\ncd\x0ce");
        assert_eq!(
            layout.events,
            vec![
                Event::Char('a'),
                Event::Char('b'),
                Event::Cr,
                Event::Lf,
                Event::Char('c'),
                Event::Char('d'),
                Event::NewPage,
                Event::Char('e'),
            ]
        );
    }

    #[test]
    fn test_escape_bytes_are_not_commands() {
        let layout = run(&mut PlainInterpreter::new(Box::new(Cp437)), b"\x1bE\r\tx\x7f");
        assert_eq!(layout.text(), "Ex");
    }

    #[test]
    fn test_high_bytes_translated() {
        let layout = run(&mut PlainInterpreter::new(Box::new(Cp437)), &[0x9C, 0xA4]);
        assert_eq!(layout.text(), "£ñ");
        let layout = run(&mut PlainInterpreter::new(Box::new(Ascii)), &[0x9C, b'a']);
        assert_eq!(layout.text(), "a");
    }
}
