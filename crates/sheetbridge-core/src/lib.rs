//! # sheetbridge-core
//!
//! Addressing and filtering engine for tabular data read from a remote
//! spreadsheet store.
//!
//! This crate provides:
//! - [`TypeTag`] - Integer / Float / Text classification of cell text
//! - [`encode_column`] - Column index to column letters
//! - [`locate`] - Trim a padded cell matrix to its occupied region
//! - [`cell_address`], [`row_span_address`], [`column_span_address`] - Address strings
//! - [`resolve_index`], [`extract_column`] - Header-name column lookup
//! - [`evaluate`] - Typed comparison filters over one column
//!
//! Every function here is pure: it borrows its input matrix and returns a new
//! value, so concurrent callers need no coordination.
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge_core::{evaluate, locate, FilterSpec, Operator};
//!
//! let raw = vec![
//!     vec![],
//!     vec!["ID".to_string(), "Score".to_string()],
//!     vec!["1".to_string(), "9.8".to_string()],
//!     vec!["2".to_string(), "10.4".to_string()],
//! ];
//!
//! let located = locate(&raw);
//! assert_eq!(located.bounds.origin_row, 1);
//! assert_eq!(located.range.unwrap().to_string(), "A:B");
//!
//! let spec = FilterSpec::new("Score", Operator::GreaterThan, "10.0");
//! let rows = evaluate(&located.matrix, &spec).unwrap();
//! assert_eq!(rows.len(), 2); // header + one match
//! ```

pub mod bounds;
pub mod cell;
pub mod error;
pub mod filter;
pub mod resolve;

pub use bounds::{locate, BoundingBox, Located};
pub use cell::{
    cell_address, column_span_address, encode_column, parse_float, row_span_address,
    sheet_span_address, CellMatrix, ColumnSpan, Row, TypeTag,
};
pub use error::{Error, Result};
pub use filter::{evaluate, FilterSpec, Operator};
pub use resolve::{extract_column, resolve_index, select_column};
