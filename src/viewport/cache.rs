//! Row cache: the most recently received data block.
//!
//! A viewport keeps at most one block of rows around, tagged with its
//! origin offset in the logical dataset. A new visible window that falls
//! entirely inside the block is served from here without a round trip to
//! the host.

use crate::types::{CellValue, GridRow, RowRange};

/// The most recently received data block plus its origin offset.
#[derive(Debug, Clone)]
pub struct RowCache {
    offset: u32,
    rows: Vec<GridRow>,
}

impl RowCache {
    /// Cache a block whose first row sits at `offset` in the dataset.
    #[must_use]
    pub fn new(offset: u32, rows: Vec<GridRow>) -> Self {
        Self { offset, rows }
    }

    /// Offset of the first cached row in the logical dataset.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of cached rows.
    #[must_use]
    pub fn len(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    /// True when the block holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when `range` lies entirely inside the cached block.
    #[must_use]
    pub fn contains(&self, range: RowRange) -> bool {
        range.from >= self.offset && range.to <= self.offset + self.len()
    }

    /// The cached rows covering `range`, or `None` when any part of the
    /// range falls outside the block.
    #[must_use]
    pub fn slice(&self, range: RowRange) -> Option<&[GridRow]> {
        if !self.contains(range) {
            return None;
        }
        let start = (range.from - self.offset) as usize;
        let end = (range.to - self.offset) as usize;
        self.rows.get(start..end)
    }

    /// Look up a single cell by absolute dataset row index.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        if row < self.offset {
            return None;
        }
        self.rows
            .get((row - self.offset) as usize)
            .and_then(|r| r.get(col as usize))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn block(offset: u32, count: u32) -> RowCache {
        let rows = (0..count)
            .map(|r| vec![format!("r{}c0", offset + r), format!("r{}c1", offset + r)])
            .collect();
        RowCache::new(offset, rows)
    }

    #[test]
    fn contains_is_inclusive_of_block_bounds() {
        let cache = block(10, 20);
        assert!(cache.contains(RowRange::new(10, 30)));
        assert!(cache.contains(RowRange::new(15, 20)));
        assert!(!cache.contains(RowRange::new(9, 15)));
        assert!(!cache.contains(RowRange::new(25, 31)));
    }

    #[test]
    fn slice_returns_rows_relative_to_offset() {
        let cache = block(10, 20);
        let rows = cache.slice(RowRange::new(12, 15)).expect("inside block");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "r12c0");
        assert_eq!(rows[2][0], "r14c0");
    }

    #[test]
    fn slice_outside_block_is_none() {
        let cache = block(10, 20);
        assert!(cache.slice(RowRange::new(0, 5)).is_none());
        assert!(cache.slice(RowRange::new(25, 35)).is_none());
    }

    #[test]
    fn cell_uses_absolute_row_indices() {
        let cache = block(10, 20);
        assert_eq!(cache.cell(10, 1).map(String::as_str), Some("r10c1"));
        assert_eq!(cache.cell(29, 0).map(String::as_str), Some("r29c0"));
        assert!(cache.cell(9, 0).is_none());
        assert!(cache.cell(30, 0).is_none());
        assert!(cache.cell(10, 2).is_none());
    }
}
