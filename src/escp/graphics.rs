//! Bit image assembly for `ESC * m nL nH d1 d2 ...`.
//!
//! ## Payload Layout
//!
//! | Offset | Meaning |
//! |--------|---------|
//! | 0 | graphics mode `m` (logged only) |
//! | 1–2 | column count `N`, little-endian |
//! | 3.. | `3N` data bytes, three per column, top dots first |
//!
//! The block is complete after exactly `3 + 3N` bytes. An incomplete block
//! is never drawn.

use crate::pixmap::Pixmap;

/// Bytes before the column data.
pub const HEADER_LEN: usize = 3;

/// Bytes per 24-dot column.
pub const BYTES_PER_COLUMN: usize = 3;

/// Result of feeding one byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Pending,
    Completed(Pixmap),
}

#[derive(Debug, Clone, Default)]
pub struct GraphicsAssembler {
    mode: u8,
    expected_columns: u16,
    consumed: usize,
    column: [u8; BYTES_PER_COLUMN],
    partial: Pixmap,
}

impl GraphicsAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    /// Column count, valid once the header is in.
    pub fn expected_columns(&self) -> u16 {
        self.expected_columns
    }

    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    fn total_len(&self) -> usize {
        HEADER_LEN + self.expected_columns as usize * BYTES_PER_COLUMN
    }

    pub fn feed(&mut self, byte: u8) -> Feed {
        match self.consumed {
            0 => self.mode = byte,
            1 => self.expected_columns = byte as u16,
            2 => {
                self.expected_columns |= (byte as u16) << 8;
                self.partial = Pixmap::with_capacity(self.expected_columns as usize);
                log::debug!(
                    "graphics: mode {} with {} columns",
                    self.mode,
                    self.expected_columns
                );
            }
            n => {
                let offset = (n - HEADER_LEN) % BYTES_PER_COLUMN;
                self.column[offset] = byte;
                if offset == BYTES_PER_COLUMN - 1 {
                    self.partial.push(Pixmap::pack_column(self.column));
                }
            }
        }
        self.consumed += 1;

        if self.consumed >= HEADER_LEN && self.consumed == self.total_len() {
            Feed::Completed(std::mem::take(&mut self.partial))
        } else {
            Feed::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed_all(assembler: &mut GraphicsAssembler, bytes: &[u8]) -> Vec<Feed> {
        bytes.iter().map(|&b| assembler.feed(b)).collect()
    }

    #[test]
    fn test_two_columns() {
        let mut a = GraphicsAssembler::new();
        let results = feed_all(&mut a, &[39, 2, 0, 0x80, 0x00, 0x01, 0xFF, 0x0F, 0xF0]);
        let (last, rest) = results.split_last().unwrap();
        assert!(rest.iter().all(|r| *r == Feed::Pending));
        assert_eq!(*last, Feed::Completed(Pixmap::from(vec![0x80_0001, 0xFF_0FF0])));
        assert_eq!(a.mode(), 39);
    }

    #[test]
    fn test_zero_columns_complete_after_header() {
        let mut a = GraphicsAssembler::new();
        assert_eq!(a.feed(32), Feed::Pending);
        assert_eq!(a.feed(0), Feed::Pending);
        assert_eq!(a.feed(0), Feed::Completed(Pixmap::new()));
    }

    #[test]
    fn test_little_endian_count() {
        let mut a = GraphicsAssembler::new();
        feed_all(&mut a, &[33, 0x2C, 0x01]);
        assert_eq!(a.expected_columns(), 300);
        let data = vec![0u8; 300 * 3];
        let results = feed_all(&mut a, &data);
        assert_eq!(results.iter().filter(|r| **r != Feed::Pending).count(), 1);
        match results.last() {
            Some(Feed::Completed(p)) => assert_eq!(p.len(), 300),
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_stays_pending() {
        let mut a = GraphicsAssembler::new();
        let results = feed_all(&mut a, &[39, 2, 0, 1, 2, 3, 4, 5]);
        assert!(results.iter().all(|r| *r == Feed::Pending));
        assert_eq!(a.bytes_consumed(), 8);
    }
}
