//! Request bodies, using the JSON field names of the HTTP API.
//!
//! Every struct deserializes leniently (missing fields become empty) so that
//! a missing field is reported by `validate()` as a validation error naming
//! the field, rather than as a JSON error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sheetbridge_core::{CellMatrix, Row};

use crate::error::{Result, ServiceError};

fn require(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ServiceError::required(field));
    }
    Ok(())
}

fn require_some<T>(items: &[T], field: &str) -> Result<()> {
    if items.is_empty() {
        return Err(ServiceError::required(field));
    }
    Ok(())
}

fn require_same_len(rows: usize, rows_field: &str, range: usize) -> Result<()> {
    if rows != range {
        return Err(ServiceError::Validation(format!(
            "{rows_field} and range must have the same length ({rows} vs {range})"
        )));
    }
    Ok(())
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn cell_matrix<'de, D>(deserializer: D) -> std::result::Result<CellMatrix, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Value>> = Deserialize::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_row<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Row, D::Error> {
    let cells: Vec<Value> = Deserialize::deserialize(deserializer)?;
    Ok(cells.into_iter().map(cell_text).collect())
}

/// A row number or column index as sent by callers: `"4"` or `4`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(i64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<i64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret as a 1-based sheet row
    pub fn row(&self) -> Result<u32> {
        self.value()
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ServiceError::Validation(format!("invalid row number: {self}")))
    }

    /// Interpret as a 0-based column index
    pub fn column(&self) -> Result<usize> {
        self.value()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| ServiceError::Validation(format!("invalid column index: {self}")))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::Number(n) => write!(f, "{n}"),
            Coordinate::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Coordinate {
    fn from(n: i64) -> Self {
        Coordinate::Number(n)
    }
}

impl From<&str> for Coordinate {
    fn from(s: &str) -> Self {
        Coordinate::Text(s.to_string())
    }
}

/// A `[row, column]` pair: 1-based row, 0-based column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPosition(pub Coordinate, pub Coordinate);

impl CellPosition {
    pub fn new<R: Into<Coordinate>, C: Into<Coordinate>>(row: R, column: C) -> Self {
        Self(row.into(), column.into())
    }

    /// Validated (row, column)
    pub fn resolve(&self) -> Result<(u32, usize)> {
        Ok((self.0.row()?, self.1.column()?))
    }
}

/// `{"spreadsheetID"}`: GetAll, GetSheets, GetSpreadsheetById, DeleteSpreadsheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpreadsheetRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
}

impl SpreadsheetRequest {
    pub fn new<S: Into<String>>(spreadsheet_id: S) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")
    }
}

/// `{"spreadsheetID", "sheetName"}`: GetSheetData, CreateSheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

impl SheetRequest {
    pub fn new<S: Into<String>, N: Into<String>>(spreadsheet_id: S, sheet_name: N) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")
    }
}

/// GetByColumn
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub column_name: String,
}

impl ColumnRequest {
    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require(&self.column_name, "columnName")
    }
}

/// GetByFilter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub column_name: String,
    pub operator: String,
    pub value: String,
}

impl FilterRequest {
    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require(&self.column_name, "columnName")?;
        require(&self.operator, "operator")?;
        require(&self.value, "value")
    }
}

/// CreateData: rows appended below the sheet's table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDataRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    #[serde(deserialize_with = "cell_matrix")]
    pub rows: CellMatrix,
}

impl CreateDataRequest {
    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require_some(&self.rows, "rows")
    }
}

/// CreateSpreadsheet; an empty title falls back to "New Spreadsheet"
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSpreadsheetRequest {
    pub title: String,
}

/// UpdateDataRow: `rows[i]` replaces sheet row `range[i]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDataRowRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    #[serde(deserialize_with = "cell_matrix")]
    pub rows: CellMatrix,
    pub range: Vec<Coordinate>,
}

impl UpdateDataRowRequest {
    /// Validate and pair each row with its sheet row number
    pub fn resolve(&self) -> Result<Vec<(u32, &Row)>> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require_some(&self.rows, "rows")?;
        require_some(&self.range, "range")?;
        require_same_len(self.rows.len(), "rows", self.range.len())?;

        self.range
            .iter()
            .zip(&self.rows)
            .map(|(row, values)| Ok((row.row()?, values)))
            .collect()
    }
}

/// UpdateDataCell: `cells[i]` written at `range[i]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDataCellRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    #[serde(deserialize_with = "cell_row")]
    pub cells: Row,
    pub range: Vec<CellPosition>,
}

impl UpdateDataCellRequest {
    /// Validate and pair each value with its (row, column)
    pub fn resolve(&self) -> Result<Vec<(u32, usize, &str)>> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require_some(&self.cells, "cells")?;
        require_some(&self.range, "range")?;
        require_same_len(self.cells.len(), "cells", self.range.len())?;

        self.range
            .iter()
            .zip(&self.cells)
            .map(|(pos, value)| {
                let (row, col) = pos.resolve()?;
                Ok((row, col, value.as_str()))
            })
            .collect()
    }
}

/// UpdateSpreadsheet: rename the spreadsheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSpreadsheetRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub title: String,
}

impl UpdateSpreadsheetRequest {
    pub fn validate(&self) -> Result<()> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.title, "title")
    }
}

/// UpdateSheet: rename a sheet by id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSheetRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    #[serde(rename = "sheetID")]
    pub sheet_id: Option<i64>,
    pub new_sheet_name: String,
}

impl UpdateSheetRequest {
    /// Validate and return the sheet id
    pub fn resolve(&self) -> Result<i64> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        let sheet_id = self.sheet_id.ok_or_else(|| ServiceError::required("sheetID"))?;
        require(&self.new_sheet_name, "newSheetName")?;
        Ok(sheet_id)
    }
}

/// DeleteDataRow: clear whole table rows
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDataRowRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub range: Vec<Coordinate>,
}

impl DeleteDataRowRequest {
    /// Validate and return the sheet row numbers
    pub fn resolve(&self) -> Result<Vec<u32>> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require_some(&self.range, "range")?;
        self.range.iter().map(Coordinate::row).collect()
    }
}

/// DeleteDataCell: clear single cells
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDataCellRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub range: Vec<CellPosition>,
}

impl DeleteDataCellRequest {
    /// Validate and return the (row, column) pairs
    pub fn resolve(&self) -> Result<Vec<(u32, usize)>> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        require(&self.sheet_name, "sheetName")?;
        require_some(&self.range, "range")?;
        self.range.iter().map(CellPosition::resolve).collect()
    }
}

/// DeleteSheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteSheetRequest {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    #[serde(rename = "sheetID")]
    pub sheet_id: Option<i64>,
}

impl DeleteSheetRequest {
    /// Validate and return the sheet id
    pub fn resolve(&self) -> Result<i64> {
        require(&self.spreadsheet_id, "spreadsheetID")?;
        self.sheet_id.ok_or_else(|| ServiceError::required("sheetID"))
    }
}
