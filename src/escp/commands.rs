//! # ESC/P Command Table
//!
//! Control bytes and the `ESC <byte>` commands the interpreter understands.
//!
//! ## Escape Sequence Structure
//!
//! - Single byte controls: `CR`, `LF`, `FF`, `SO`, `DC4`, `SI`, `DC2`, `HT`
//! - Two bytes: `ESC E`, `ESC 4`, `ESC @`
//! - Fixed parameters: `ESC 3 n`, `ESC - n`, `ESC x n1 n2`
//! - NUL terminated: `ESC D n1 n2 ... 00`
//! - Length prefixed: `ESC * m nL nH d1 d2 ...`
//!
//! Commands are looked up, not branched on: [`lookup`] maps the command byte
//! to a [`Command`], and [`Command::continuation`] says how many bytes follow.
//! Anything missing from the table is an unknown command and consumes no
//! parameter bytes.

// ============================================================================
// CONTROL CODES
// ============================================================================

/// HT - Horizontal tab
pub const HT: u8 = 0x09;

/// LF - Line feed
pub const LF: u8 = 0x0A;

/// FF - Form feed, unconditional page break
pub const FF: u8 = 0x0C;

/// CR - Carriage return
pub const CR: u8 = 0x0D;

/// SO - Expanded printing for one line
pub const SO: u8 = 0x0E;

/// SI - Condensed printing
pub const SI: u8 = 0x0F;

/// DC2 - Cancel condensed printing
pub const DC2: u8 = 0x12;

/// DC4 - Cancel one-line expanded printing
pub const DC4: u8 = 0x14;

/// ESC - Command prefix
pub const ESC: u8 = 0x1B;

/// Terminator of NUL-terminated parameter lists.
pub const NUL: u8 = 0x00;

// ============================================================================
// COMMAND TABLE
// ============================================================================

/// Recognized `ESC` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `ESC E`
    BoldOn,
    /// `ESC F`
    BoldOff,
    /// `ESC 4`
    ItalicOn,
    /// `ESC 5`
    ItalicOff,
    /// `ESC @` - reset to power-on state
    Initialize,
    /// `ESC 0` - 1/8 inch line spacing
    EighthInchSpacing,
    /// `ESC 2` - 1/6 inch line spacing
    SixthInchSpacing,
    /// `ESC - n` - underline on (n = 1 or '1') or off (n = 0 or '0')
    Underline,
    /// `ESC 3 n` - n/180 inch line spacing
    SetLineSpacing,
    /// `ESC D n1 .. nk NUL` - tab stops; only the first stop is used
    SetTabWidth,
    /// `ESC x n1 n2` - print quality, ignored
    SelectQuality,
    /// `ESC * m nL nH data` - bit image graphics
    DrawGraphics,
}

/// What follows a command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Command is complete
    None,
    /// Exactly this many parameter bytes
    Fixed(usize),
    /// Parameter bytes up to and including the terminator
    Terminated(u8),
    /// Bytes are handed to a sub-assembler until it completes
    Delegated,
}

const TABLE: &[(u8, Command)] = &[
    (b'E', Command::BoldOn),
    (b'F', Command::BoldOff),
    (b'4', Command::ItalicOn),
    (b'5', Command::ItalicOff),
    (b'@', Command::Initialize),
    (b'0', Command::EighthInchSpacing),
    (b'2', Command::SixthInchSpacing),
    (b'-', Command::Underline),
    (b'3', Command::SetLineSpacing),
    (b'D', Command::SetTabWidth),
    (b'x', Command::SelectQuality),
    (b'*', Command::DrawGraphics),
];

/// Find the command selected by the byte after `ESC`.
pub fn lookup(byte: u8) -> Option<Command> {
    TABLE
        .iter()
        .find(|(b, _)| *b == byte)
        .map(|(_, command)| *command)
}

impl Command {
    pub fn continuation(self) -> Continuation {
        match self {
            Command::BoldOn
            | Command::BoldOff
            | Command::ItalicOn
            | Command::ItalicOff
            | Command::Initialize
            | Command::EighthInchSpacing
            | Command::SixthInchSpacing => Continuation::None,
            Command::Underline | Command::SetLineSpacing => Continuation::Fixed(1),
            Command::SelectQuality => Continuation::Fixed(2),
            Command::SetTabWidth => Continuation::Terminated(NUL),
            Command::DrawGraphics => Continuation::Delegated,
        }
    }

    /// The command byte that selects this command.
    pub fn byte(self) -> u8 {
        TABLE
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(b, _)| *b)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        assert_eq!(lookup(b'E'), Some(Command::BoldOn));
        assert_eq!(lookup(b'3'), Some(Command::SetLineSpacing));
        assert_eq!(lookup(b'*'), Some(Command::DrawGraphics));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup(0x99), None);
        assert_eq!(lookup(b'e'), None);
        assert_eq!(lookup(ESC), None);
    }

    #[test]
    fn test_continuations() {
        assert_eq!(Command::BoldOn.continuation(), Continuation::None);
        assert_eq!(Command::Underline.continuation(), Continuation::Fixed(1));
        assert_eq!(Command::SetLineSpacing.continuation(), Continuation::Fixed(1));
        assert_eq!(Command::SelectQuality.continuation(), Continuation::Fixed(2));
        assert_eq!(Command::SetTabWidth.continuation(), Continuation::Terminated(NUL));
        assert_eq!(Command::DrawGraphics.continuation(), Continuation::Delegated);
    }

    #[test]
    fn test_table_bytes_are_unique() {
        for (i, (a, _)) in TABLE.iter().enumerate() {
            assert!(TABLE[i + 1..].iter().all(|(b, _)| a != b), "duplicate 0x{:02X}", a);
        }
    }

    #[test]
    fn test_byte_round_trips_table() {
        for &(byte, command) in TABLE {
            assert_eq!(command.byte(), byte);
        }
    }
}
