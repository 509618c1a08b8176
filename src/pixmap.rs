//! # Dot Column Bitmaps
//!
//! A [`Pixmap`] is the bitmap carried by a 24-pin graphics command: one
//! `u32` per printed column, low 24 bits used, bit 23 = topmost dot.

/// Number of vertical dots in one column.
pub const DOTS_PER_COLUMN: usize = 24;

/// Mask of the meaningful bits of a column.
pub const COLUMN_MASK: u32 = 0x00FF_FFFF;

/// Ordered sequence of 24-dot columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pixmap {
    columns: Vec<u32>,
}

impl Pixmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(columns: usize) -> Self {
        Self {
            columns: Vec::with_capacity(columns),
        }
    }

    /// Pack three data bytes into a column (first byte = top 8 dots).
    #[inline]
    pub fn pack_column(bytes: [u8; 3]) -> u32 {
        u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
    }

    /// Append a column. Bits above the 24th are discarded.
    pub fn push(&mut self, column: u32) {
        self.columns.push(column & COLUMN_MASK);
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether the dot at `row` (0 = top) of `column` is set.
    #[inline]
    pub fn is_set(column: u32, row: usize) -> bool {
        row < DOTS_PER_COLUMN && column & (1 << (DOTS_PER_COLUMN - 1 - row)) != 0
    }
}

impl From<Vec<u32>> for Pixmap {
    fn from(columns: Vec<u32>) -> Self {
        Self {
            columns: columns.into_iter().map(|c| c & COLUMN_MASK).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_column_top_byte_is_high() {
        assert_eq!(Pixmap::pack_column([0x80, 0x00, 0x01]), 0x80_0001);
    }

    #[test]
    fn test_is_set_top_and_bottom() {
        let column = Pixmap::pack_column([0x80, 0x00, 0x01]);
        assert!(Pixmap::is_set(column, 0));
        assert!(Pixmap::is_set(column, 23));
        assert!(!Pixmap::is_set(column, 1));
        assert!(!Pixmap::is_set(column, 24));
    }

    #[test]
    fn test_push_masks_high_bits() {
        let mut p = Pixmap::new();
        p.push(0xFF00_0001);
        assert_eq!(p.columns(), &[0x0000_0001]);
    }
}
