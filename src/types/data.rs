//! Grid dataset types.
//!
//! The grid operates on rows of cell values already resident in memory or
//! supplied block-by-block by the host page. Cell values are strings (HTML
//! fragments); the viewport never interprets them.

/// A single cell value. May contain an HTML fragment.
pub type CellValue = String;

/// One row of the grid dataset.
pub type GridRow = Vec<CellValue>;

/// Infer the column count of a dataset.
///
/// The column count is the maximum row length across the dataset; it is not
/// fixed ahead of time and short rows are padded with blank cells when
/// rendered.
#[must_use]
pub fn column_count(rows: &[GridRow]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_is_max_row_length() {
        let rows = vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
            vec!["e".to_string(), "f".to_string()],
        ];
        assert_eq!(column_count(&rows), 3);
    }

    #[test]
    fn column_count_of_empty_dataset_is_zero() {
        assert_eq!(column_count(&[]), 0);
    }
}
