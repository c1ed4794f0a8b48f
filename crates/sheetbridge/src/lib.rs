//! # sheetbridge
//!
//! Read, filter, append, update, and clear tabular data held in a remote
//! spreadsheet store.
//!
//! Sheetbridge exposes one operation per route of a spreadsheet-backed data
//! API. Each operation validates its request, reads the sheet through a
//! [`SheetStore`], trims the padded cell matrix to its occupied region, and
//! turns caller coordinates into store addresses.
//!
//! ## Features
//!
//! - Whole-sheet and per-column reads of the occupied table
//! - Typed comparison filters (`=`, `>`, `<` on numbers, `contain` on text)
//! - Append, row/cell update and row/cell clear by sheet coordinates
//! - Spreadsheet and sheet creation, renaming and deletion
//! - Error classification into caller faults and store faults
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge::prelude::*;
//!
//! # async fn example() -> sheetbridge::Result<()> {
//! let store = MemoryStore::new().with_sheet(
//!     "roster",
//!     "Staff",
//!     vec![
//!         vec!["ID".into(), "Score".into()],
//!         vec!["1".into(), "9.8".into()],
//!         vec!["2".into(), "10.4".into()],
//!     ],
//! );
//! let service = SheetService::new(store);
//!
//! let rows = service
//!     .get_by_filter(&FilterRequest {
//!         spreadsheet_id: "roster".into(),
//!         sheet_name: "Staff".into(),
//!         column_name: "Score".into(),
//!         operator: ">".into(),
//!         value: "10.0".into(),
//!     })
//!     .await?;
//! assert_eq!(rows.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prelude;
pub mod request;
pub mod response;
pub mod service;

pub use error::{ErrorKind, Result, ServiceError};
pub use request::{
    CellPosition, ColumnRequest, Coordinate, CreateDataRequest, CreateSpreadsheetRequest,
    DeleteDataCellRequest, DeleteDataRowRequest, DeleteSheetRequest, FilterRequest, SheetRequest,
    SpreadsheetRequest, UpdateDataCellRequest, UpdateDataRowRequest, UpdateSheetRequest,
    UpdateSpreadsheetRequest,
};
pub use response::{Acknowledgement, SheetList, SheetSummary, SpreadsheetList, SpreadsheetSummary};
pub use service::SheetService;

// Re-export the engine and store so callers need a single dependency
pub use sheetbridge_core::{
    encode_column, evaluate, locate, CellMatrix, ColumnSpan, FilterSpec, Operator, Row, TypeTag,
};
pub use sheetbridge_store::{
    GoogleSheetsStore, MemoryStore, SheetStore, SpreadsheetFile, StoreConfig, StoreError,
};
