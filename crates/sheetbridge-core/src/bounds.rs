//! Occupied-region detection for padded cell matrices
//!
//! The store returns sheet contents starting at `A1`, so leading blank rows
//! (and, for tables that do not start on the first row, leading blank
//! columns) show up as padding. [`locate`] strips that padding and reports
//! where the table starts and which columns it occupies.

use crate::cell::{CellMatrix, ColumnSpan};

/// Origin of the occupied region within the raw matrix (both 0-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Index of the first row with at least one element
    pub origin_row: usize,
    /// Index of the first occupied column
    pub origin_column: usize,
}

/// Result of [`locate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Located {
    /// The raw matrix with leading rows and columns removed
    pub matrix: CellMatrix,
    /// Where the trimmed matrix sat inside the raw one
    pub bounds: BoundingBox,
    /// Occupied columns, measured from the first trimmed row.
    /// `None` when there is nothing to address.
    pub range: Option<ColumnSpan>,
}

impl Located {
    /// Check if no occupied region was found
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// The header row of the trimmed matrix, if any
    pub fn header(&self) -> Option<&[String]> {
        self.matrix.first().map(|row| row.as_slice())
    }
}

/// Trim a padded matrix to its occupied region.
///
/// The origin row is the first row with at least one element. The origin
/// column is only searched for when the origin row is not the first row: in
/// that case it is the first non-empty cell of the origin row. A table that
/// starts on the very first row always keeps column 0 as its origin, even if
/// its leading cells are blank.
///
/// Rows before the origin row are dropped, and every remaining row loses the
/// cells before the origin column. The input is left untouched.
///
/// # Examples
/// ```
/// use sheetbridge_core::locate;
///
/// let raw = vec![vec![], vec!["a".to_string(), "b".to_string()]];
/// let located = locate(&raw);
///
/// assert_eq!(located.bounds.origin_row, 1);
/// assert_eq!(located.matrix, vec![vec!["a".to_string(), "b".to_string()]]);
/// assert_eq!(located.range.unwrap().to_string(), "A:B");
/// ```
pub fn locate(matrix: &CellMatrix) -> Located {
    let Some(origin_row) = matrix.iter().position(|row| !row.is_empty()) else {
        return Located::default();
    };

    let origin_column = if origin_row > 0 {
        matrix[origin_row]
            .iter()
            .position(|value| !value.is_empty())
            .unwrap_or(0)
    } else {
        0
    };

    let trimmed: CellMatrix = matrix[origin_row..]
        .iter()
        .map(|row| row.get(origin_column..).unwrap_or_default().to_vec())
        .collect();

    let width = trimmed.first().map_or(0, Vec::len);
    let range = (width > 0)
        .then(|| ColumnSpan::from_indices(origin_column, origin_column + width - 1));

    tracing::debug!(
        origin_row,
        origin_column,
        width,
        rows = trimmed.len(),
        "located occupied region"
    );

    Located {
        matrix: trimmed,
        bounds: BoundingBox {
            origin_row,
            origin_column,
        },
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn m(rows: &[&[&str]]) -> CellMatrix {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_matrix() {
        let located = locate(&Vec::new());
        assert!(located.is_empty());
        assert_eq!(located.range, None);
        assert_eq!(located.bounds, BoundingBox::default());
    }

    #[test]
    fn test_all_rows_empty() {
        let located = locate(&vec![vec![], vec![]]);
        assert!(located.is_empty());
        assert_eq!(located.range, None);
    }

    #[test]
    fn test_leading_empty_row() {
        let raw = m(&[&[], &["a", "b"]]);
        let located = locate(&raw);

        assert_eq!(
            located.bounds,
            BoundingBox {
                origin_row: 1,
                origin_column: 0
            }
        );
        assert_eq!(located.matrix, m(&[&["a", "b"]]));
        assert_eq!(located.range, Some(ColumnSpan::new("A", "B")));
    }

    #[test]
    fn test_origin_on_first_row_keeps_column_zero() {
        let raw = m(&[&["", "x"], &["y", "z"]]);
        let located = locate(&raw);

        assert_eq!(located.bounds.origin_row, 0);
        assert_eq!(located.bounds.origin_column, 0);
        assert_eq!(located.matrix, raw);
        assert_eq!(located.range, Some(ColumnSpan::new("A", "B")));
    }

    #[test]
    fn test_offset_table() {
        // Table starts at C3
        let raw = m(&[
            &[],
            &[],
            &["", "", "ID", "Name"],
            &["", "", "1", "Ann"],
            &["", "", "2", "Bob"],
        ]);
        let located = locate(&raw);

        assert_eq!(
            located.bounds,
            BoundingBox {
                origin_row: 2,
                origin_column: 2
            }
        );
        assert_eq!(
            located.matrix,
            m(&[&["ID", "Name"], &["1", "Ann"], &["2", "Bob"]])
        );
        assert_eq!(located.range.unwrap().to_string(), "C:D");
    }

    #[test]
    fn test_short_rows_trim_to_empty() {
        let raw = m(&[&[], &["", "", "H1", "H2"], &["x"], &[]]);
        let located = locate(&raw);

        assert_eq!(located.matrix, m(&[&["H1", "H2"], &[], &[]]));
    }

    #[test]
    fn test_input_not_mutated() {
        let raw = m(&[&[], &["", "a"]]);
        let before = raw.clone();
        let _ = locate(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_header_accessor() {
        let located = locate(&m(&[&["ID", "Name"], &["1", "Ann"]]));
        assert_eq!(located.header(), Some(&["ID".to_string(), "Name".to_string()][..]));
    }
}
