//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellMatrix`] / [`Row`] - Raw cell text as returned by the store
//! - [`TypeTag`] - Inferred type of a cell's text
//! - [`encode_column`] and the address builders - Textual range identifiers

mod address;
mod value;

pub use address::{
    cell_address, column_span_address, encode_column, row_span_address, sheet_span_address,
    ColumnSpan,
};
pub use value::{parse_float, CellMatrix, Row, TypeTag};
