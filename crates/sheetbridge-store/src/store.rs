//! The store interface consumed by sheetbridge operations.

use std::future::Future;

use serde::{Deserialize, Serialize};
use sheetbridge_core::{CellMatrix, Row};

use crate::error::Result;

/// A sheet/spreadsheet metadata change applied through [`SheetStore::batch_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOperation {
    /// Add a sheet with the given title
    AddSheet { title: String },
    /// Delete the sheet with the given id
    DeleteSheet { sheet_id: i64 },
    /// Change a sheet's title
    RenameSheet { sheet_id: i64, title: String },
    /// Change the spreadsheet's title
    RenameSpreadsheet { title: String },
}

/// One sheet (tab) of a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub sheet_id: i64,
    pub title: String,
    pub index: i64,
}

/// Spreadsheet identity, title, and sheets in tab order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetInfo {
    pub id: String,
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

/// A spreadsheet file as listed by the file store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetFile {
    pub id: String,
    pub name: String,
    pub created_time: String,
    pub modified_time: String,
}

/// Operations a remote tabular store exposes to sheetbridge.
///
/// Ranges and addresses use the store's textual grammar, e.g. `Sheet1`,
/// `Sheet1!A:C`, `Sheet1!A3:C3`. Writes use "user entered" semantics: the
/// store interprets text the way it would if typed into the sheet.
///
/// Implementations are constructed once and shared across requests; every
/// method takes `&self`.
pub trait SheetStore: Send + Sync {
    /// Read the cells of `range` as rows of text
    fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<CellMatrix>> + Send;

    /// Overwrite cells starting at `address`
    fn write_range(
        &self,
        spreadsheet_id: &str,
        address: &str,
        rows: &[Row],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Append rows after the table found in `address`
    fn append_range(
        &self,
        spreadsheet_id: &str,
        address: &str,
        rows: &[Row],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Clear the values in `address`
    fn clear_range(
        &self,
        spreadsheet_id: &str,
        address: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Apply metadata changes in order
    fn batch_update(
        &self,
        spreadsheet_id: &str,
        operations: Vec<SheetOperation>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch title and sheet list
    fn spreadsheet(&self, spreadsheet_id: &str)
        -> impl Future<Output = Result<SpreadsheetInfo>> + Send;

    /// Create a spreadsheet with a single sheet named "Sheet1"; returns its id
    fn create_spreadsheet(&self, title: &str) -> impl Future<Output = Result<String>> + Send;

    /// Delete a spreadsheet file, failing if it does not exist
    fn delete_spreadsheet(&self, spreadsheet_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// List spreadsheet files, most recently modified first
    fn list_spreadsheets(&self) -> impl Future<Output = Result<Vec<SpreadsheetFile>>> + Send;
}
