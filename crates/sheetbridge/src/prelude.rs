//! Prelude module - common imports for sheetbridge users
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! ```

pub use crate::{
    // Requests
    CellPosition,
    ColumnRequest,
    Coordinate,
    CreateDataRequest,
    CreateSpreadsheetRequest,
    DeleteDataCellRequest,
    DeleteDataRowRequest,
    DeleteSheetRequest,
    FilterRequest,
    SheetRequest,
    SpreadsheetRequest,
    UpdateDataCellRequest,
    UpdateDataRowRequest,
    UpdateSheetRequest,
    UpdateSpreadsheetRequest,

    // Responses
    Acknowledgement,
    SheetList,
    SpreadsheetList,
    SpreadsheetSummary,

    // Errors
    ErrorKind,
    ServiceError,

    // Service and stores
    GoogleSheetsStore,
    MemoryStore,
    SheetService,
    SheetStore,
    StoreConfig,

    // Cell types
    CellMatrix,
    Row,
};
