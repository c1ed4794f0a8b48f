//! Column letters and address strings
//!
//! Addresses follow the store's grammar: `<Col><Row>` for a cell,
//! `<Col><Row>:<Col><Row>` for a span, optionally prefixed with `<Sheet>!`.
//! Rows are 1-based; column indices are 0-based.

use std::fmt;

/// Convert a column index to letters (0 = A, 25 = Z, 26 = BA, 27 = BB, ...)
///
/// Each step takes `index % 26` as the next letter (prepended) and divides by
/// 26, stopping once the quotient reaches zero. These are plain base-26 digits
/// with `A` as zero, so two-letter output begins at `BA`, not `AA`.
///
/// # Examples
/// ```
/// use sheetbridge_core::encode_column;
///
/// assert_eq!(encode_column(0), "A");
/// assert_eq!(encode_column(25), "Z");
/// assert_eq!(encode_column(26), "BA");
/// ```
pub fn encode_column(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;

    loop {
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
        if n == 0 {
            break;
        }
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// The occupied column range of a sheet, as letters (e.g. `A:C`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpan {
    /// First occupied column
    pub start: String,
    /// Last occupied column (inclusive)
    pub end: String,
}

impl ColumnSpan {
    /// Create a span from already-encoded letters
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a span from 0-based column indices
    pub fn from_indices(start: usize, end: usize) -> Self {
        Self::new(encode_column(start), encode_column(end))
    }

    /// Address of one row across this span on the given sheet
    pub fn row_address(&self, sheet: &str, row: u32) -> String {
        row_span_address(sheet, &self.start, &self.end, row)
    }
}

impl fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&column_span_address(&self.start, &self.end))
    }
}

/// Address of a single cell: `<sheet>!<col><row>:<col><row>`
pub fn cell_address(sheet: &str, col: &str, row: u32) -> String {
    format!("{sheet}!{col}{row}:{col}{row}")
}

/// Address of one row between two columns: `<sheet>!<start><row>:<end><row>`
pub fn row_span_address(sheet: &str, start_col: &str, end_col: &str, row: u32) -> String {
    format!("{sheet}!{start_col}{row}:{end_col}{row}")
}

/// Whole-column span without row numbers: `<start>:<end>`
pub fn column_span_address(start_col: &str, end_col: &str) -> String {
    format!("{start_col}:{end_col}")
}

/// Whole-column span on a sheet: `<sheet>!<start>:<end>`
pub fn sheet_span_address(sheet: &str, span: &ColumnSpan) -> String {
    format!("{sheet}!{span}")
}
