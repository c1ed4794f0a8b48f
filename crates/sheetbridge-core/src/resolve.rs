//! Column lookup by header name

use crate::cell::{CellMatrix, Row};
use crate::error::{Error, Result};

/// Find the index of `name` in the header row.
///
/// Matching is exact and case-sensitive; the first match wins.
///
/// # Examples
/// ```
/// use sheetbridge_core::resolve_index;
///
/// let header = vec!["ID".to_string(), "Name".to_string(), "Email".to_string()];
/// assert_eq!(resolve_index(&header, "Name").unwrap(), 1);
/// assert!(resolve_index(&header, "Phone").is_err());
/// ```
pub fn resolve_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|cell| cell == name)
        .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
}

/// Values of one column across the data rows (header excluded).
///
/// Rows too short to reach the column are skipped, not padded, so the
/// result can be shorter than the number of data rows.
pub fn extract_column(matrix: &CellMatrix, index: usize) -> Vec<String> {
    column_cells(matrix.iter().skip(1), index)
}

/// Values of one column, header cell first, followed by [`extract_column`]'s values.
pub fn select_column(matrix: &CellMatrix, index: usize) -> Vec<String> {
    column_cells(matrix.iter(), index)
}

fn column_cells<'a>(rows: impl Iterator<Item = &'a Row>, index: usize) -> Vec<String> {
    rows.filter_map(|row| row.get(index).cloned()).collect()
}
