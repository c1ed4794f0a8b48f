//! In-process [`SheetStore`] used by tests and offline runs.
//!
//! The memory store follows the same conventions as the Sheets API where
//! sheetbridge depends on them:
//!
//! - reads return rows relative to the range start, with trailing empty cells
//!   and trailing empty rows trimmed, leading empties kept
//! - writes pad the sheet with empty cells as needed
//! - appends land after the last non-empty row of the sheet
//! - a missing spreadsheet or sheet is a 404, an invalid sheet operation is a 400

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use sheetbridge_core::{CellMatrix, Row};

use crate::error::{Result, StoreError};
use crate::store::{SheetInfo, SheetOperation, SheetStore, SpreadsheetFile, SpreadsheetInfo};
use crate::wire::cell_text;

#[derive(Debug, Clone)]
struct SheetData {
    sheet_id: i64,
    title: String,
    cells: CellMatrix,
}

#[derive(Debug, Clone)]
struct SpreadsheetData {
    title: String,
    sheets: Vec<SheetData>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl SpreadsheetData {
    fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            title: title.to_string(),
            sheets: Vec::new(),
            created: now,
            modified: now,
        }
    }

    fn sheet(&self, title: &str) -> Option<&SheetData> {
        self.sheets.iter().find(|s| s.title == title)
    }

    fn sheet_mut(&mut self, title: &str) -> Option<&mut SheetData> {
        self.sheets.iter_mut().find(|s| s.title == title)
    }

    fn next_sheet_id(&self) -> i64 {
        self.sheets.iter().map(|s| s.sheet_id + 1).max().unwrap_or(0)
    }

    fn info(&self, id: &str) -> SpreadsheetInfo {
        SpreadsheetInfo {
            id: id.to_string(),
            title: self.title.clone(),
            sheets: self
                .sheets
                .iter()
                .enumerate()
                .map(|(index, s)| SheetInfo {
                    sheet_id: s.sheet_id,
                    title: s.title.clone(),
                    index: index as i64,
                })
                .collect(),
        }
    }

    fn apply(&mut self, op: SheetOperation) -> Result<()> {
        match op {
            SheetOperation::AddSheet { title } => {
                self.ensure_unique_title(&title)?;
                let sheet_id = self.next_sheet_id();
                self.sheets.push(SheetData {
                    sheet_id,
                    title,
                    cells: Vec::new(),
                });
            }
            SheetOperation::DeleteSheet { sheet_id } => {
                let pos = self.position(sheet_id)?;
                if self.sheets.len() == 1 {
                    return Err(StoreError::bad_request(
                        "You can't remove all the sheets in a document.",
                    ));
                }
                self.sheets.remove(pos);
            }
            SheetOperation::RenameSheet { sheet_id, title } => {
                let pos = self.position(sheet_id)?;
                if self.sheets[pos].title != title {
                    self.ensure_unique_title(&title)?;
                }
                self.sheets[pos].title = title;
            }
            SheetOperation::RenameSpreadsheet { title } => {
                self.title = title;
            }
        }
        Ok(())
    }

    fn position(&self, sheet_id: i64) -> Result<usize> {
        self.sheets
            .iter()
            .position(|s| s.sheet_id == sheet_id)
            .ok_or_else(|| StoreError::bad_request(format!("No grid with id: {sheet_id}")))
    }

    fn ensure_unique_title(&self, title: &str) -> Result<()> {
        if self.sheet(title).is_some() {
            return Err(StoreError::bad_request(format!(
                "A sheet with the name \"{title}\" already exists. Please enter another name."
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct State {
    spreadsheets: BTreeMap<String, SpreadsheetData>,
    created: u64,
}

/// A parsed range reference. Row and column indices are 0-based; an
/// end of `None` means the range is unbounded in that direction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeRef {
    sheet: String,
    first_row: usize,
    last_row: Option<usize>,
    first_col: usize,
    last_col: Option<usize>,
}

impl RangeRef {
    fn parse(range: &str) -> Result<Self> {
        let invalid = || StoreError::InvalidAddress(range.to_string());

        let (sheet, cells) = match range.rsplit_once('!') {
            Some((sheet, cells)) => (sheet, Some(cells)),
            None => (range, None),
        };
        let sheet = sheet
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .map(|s| s.replace("''", "'"))
            .unwrap_or_else(|| sheet.to_string());
        if sheet.is_empty() {
            return Err(invalid());
        }

        let Some(cells) = cells else {
            return Ok(Self {
                sheet,
                first_row: 0,
                last_row: None,
                first_col: 0,
                last_col: None,
            });
        };

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (
                parse_cell_ref(start).ok_or_else(invalid)?,
                Some(parse_cell_ref(end).ok_or_else(invalid)?),
            ),
            None => (parse_cell_ref(cells).ok_or_else(invalid)?, None),
        };

        let (first_col, first_row) = (start.0.unwrap_or(0), start.1.unwrap_or(0));
        let (last_col, last_row) = match end {
            Some((col, row)) => (col, row),
            None => (start.0, start.1),
        };

        if last_col.is_some_and(|c| c < first_col) || last_row.is_some_and(|r| r < first_row) {
            return Err(invalid());
        }

        Ok(Self {
            sheet,
            first_row,
            last_row,
            first_col,
            last_col,
        })
    }

    fn row_fits(&self, offset: usize) -> bool {
        self.last_row.map_or(true, |last| self.first_row + offset <= last)
    }

    fn col_fits(&self, offset: usize) -> bool {
        self.last_col.map_or(true, |last| self.first_col + offset <= last)
    }
}

/// Split `B12` into its column and row, both 0-based. Either half may be
/// missing (`B` or `12`) but not both.
fn parse_cell_ref(s: &str) -> Option<(Option<usize>, Option<usize>)> {
    let split = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (letters, digits) = s.split_at(split);
    if letters.is_empty() && digits.is_empty() {
        return None;
    }

    let col = if letters.is_empty() {
        None
    } else {
        Some(decode_column(letters)?)
    };
    let row = if digits.is_empty() {
        None
    } else {
        let n: usize = digits.parse().ok()?;
        Some(n.checked_sub(1)?)
    };
    Some((col, row))
}

/// Inverse of `sheetbridge_core::encode_column`
fn decode_column(letters: &str) -> Option<usize> {
    letters.bytes().try_fold(0usize, |n, b| {
        let digit = (b.to_ascii_uppercase() - b'A') as usize;
        n.checked_mul(26)?.checked_add(digit)
    })
}

fn trim_trailing(mut matrix: CellMatrix) -> CellMatrix {
    for row in &mut matrix {
        while row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
    }
    while matrix.last().is_some_and(|r| r.is_empty()) {
        matrix.pop();
    }
    matrix
}

fn put_cell(cells: &mut CellMatrix, row: usize, col: usize, value: String) {
    if cells.len() <= row {
        cells.resize_with(row + 1, Vec::new);
    }
    let target = &mut cells[row];
    if target.len() <= col {
        target.resize(col + 1, String::new());
    }
    target[col] = value;
}

fn write_at(sheet: &mut SheetData, range: &RangeRef, first_row: usize, rows: &[Row]) -> Result<()> {
    let row_offset = first_row - range.first_row;
    if !rows.is_empty() && !range.row_fits(row_offset + rows.len() - 1) {
        return Err(StoreError::bad_request(format!(
            "Requested writing within range [{}], but tried writing to row [{}]",
            range.sheet,
            first_row + rows.len()
        )));
    }
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width > 0 && !range.col_fits(width - 1) {
        return Err(StoreError::bad_request(format!(
            "Requested writing within range [{}], but tried writing to column [{}]",
            range.sheet,
            sheetbridge_core::encode_column(range.first_col + width - 1)
        )));
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            put_cell(&mut sheet.cells, first_row + r, range.first_col + c, value.clone());
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    spreadsheets: Vec<FixtureSpreadsheet>,
}

#[derive(Debug, Deserialize)]
struct FixtureSpreadsheet {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sheets: Vec<FixtureSheet>,
}

#[derive(Debug, Deserialize)]
struct FixtureSheet {
    title: String,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

/// A [`SheetStore`] holding spreadsheets in memory.
///
/// ```
/// use sheetbridge_store::MemoryStore;
///
/// let store = MemoryStore::new().with_sheet(
///     "book",
///     "Sheet1",
///     vec![vec!["Name".into(), "Age".into()], vec!["Ann".into(), "31".into()]],
/// );
/// assert_eq!(store.sheet_cells("book", "Sheet1").unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load spreadsheets from a JSON fixture.
    ///
    /// ```json
    /// {"spreadsheets": [{"id": "abc", "title": "Staff",
    ///   "sheets": [{"title": "Sheet1", "rows": [["Name", "Age"], ["Ann", 31]]}]}]}
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let store = Self::new();
        for spreadsheet in fixture.spreadsheets {
            let title = spreadsheet.title.as_deref().unwrap_or(&spreadsheet.id);
            store.insert_spreadsheet(&spreadsheet.id, title);
            for sheet in spreadsheet.sheets {
                let rows = sheet
                    .rows
                    .into_iter()
                    .map(|row| row.into_iter().map(cell_text).collect())
                    .collect();
                store.insert_sheet(&spreadsheet.id, &sheet.title, rows);
            }
        }
        Ok(store)
    }

    /// Load a JSON fixture file (see [`MemoryStore::from_json`])
    pub fn from_fixture<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builder form of [`MemoryStore::insert_sheet`]
    pub fn with_sheet(self, spreadsheet_id: &str, title: &str, rows: CellMatrix) -> Self {
        self.insert_sheet(spreadsheet_id, title, rows);
        self
    }

    /// Add an empty spreadsheet, replacing any with the same id
    pub fn insert_spreadsheet(&self, spreadsheet_id: &str, title: &str) {
        self.lock()
            .spreadsheets
            .insert(spreadsheet_id.to_string(), SpreadsheetData::new(title));
    }

    /// Add or replace a sheet, creating the spreadsheet (titled by its id) if needed
    pub fn insert_sheet(&self, spreadsheet_id: &str, title: &str, rows: CellMatrix) {
        let mut state = self.lock();
        let spreadsheet = state
            .spreadsheets
            .entry(spreadsheet_id.to_string())
            .or_insert_with(|| SpreadsheetData::new(spreadsheet_id));

        match spreadsheet.sheet_mut(title) {
            Some(sheet) => sheet.cells = rows,
            None => {
                let sheet_id = spreadsheet.next_sheet_id();
                spreadsheet.sheets.push(SheetData {
                    sheet_id,
                    title: title.to_string(),
                    cells: rows,
                });
            }
        }
    }

    /// Raw cells of a sheet, without any trimming
    pub fn sheet_cells(&self, spreadsheet_id: &str, title: &str) -> Option<CellMatrix> {
        self.lock()
            .spreadsheets
            .get(spreadsheet_id)
            .and_then(|s| s.sheet(title))
            .map(|s| s.cells.clone())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_sheet_mut<T>(
        &self,
        spreadsheet_id: &str,
        range: &RangeRef,
        f: impl FnOnce(&mut SheetData) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.lock();
        let spreadsheet = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(StoreError::not_found)?;
        spreadsheet.modified = Utc::now();
        let sheet = spreadsheet
            .sheet_mut(&range.sheet)
            .ok_or_else(|| unknown_sheet(&range.sheet))?;
        f(sheet)
    }
}

fn unknown_sheet(sheet: &str) -> StoreError {
    StoreError::Api {
        status: 404,
        message: format!("Unable to parse range: {sheet}"),
    }
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SheetStore for MemoryStore {
    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<CellMatrix> {
        let range = RangeRef::parse(range)?;
        let state = self.lock();
        let sheet = state
            .spreadsheets
            .get(spreadsheet_id)
            .ok_or_else(StoreError::not_found)?
            .sheet(&range.sheet)
            .ok_or_else(|| unknown_sheet(&range.sheet))?;

        let rows_end = range
            .last_row
            .map_or(sheet.cells.len(), |last| (last + 1).min(sheet.cells.len()));
        let window = sheet
            .cells
            .get(range.first_row..rows_end)
            .unwrap_or_default()
            .iter()
            .map(|row| {
                let cols_end = range
                    .last_col
                    .map_or(row.len(), |last| (last + 1).min(row.len()));
                row.get(range.first_col..cols_end)
                    .unwrap_or_default()
                    .to_vec()
            })
            .collect();

        Ok(trim_trailing(window))
    }

    async fn write_range(&self, spreadsheet_id: &str, address: &str, rows: &[Row]) -> Result<()> {
        let range = RangeRef::parse(address)?;
        self.with_sheet_mut(spreadsheet_id, &range, |sheet| {
            write_at(sheet, &range, range.first_row, rows)
        })?;
        tracing::debug!("Wrote {} row(s) to {address}", rows.len());
        Ok(())
    }

    async fn append_range(&self, spreadsheet_id: &str, address: &str, rows: &[Row]) -> Result<()> {
        let range = RangeRef::parse(address)?;
        self.with_sheet_mut(spreadsheet_id, &range, |sheet| {
            let next = sheet
                .cells
                .iter()
                .rposition(|row| row.iter().any(|c| !c.is_empty()))
                .map_or(0, |last| last + 1)
                .max(range.first_row);
            let unbounded_rows = RangeRef {
                last_row: None,
                ..range.clone()
            };
            write_at(sheet, &unbounded_rows, next, rows)
        })?;
        tracing::debug!("Appended {} row(s) at {address}", rows.len());
        Ok(())
    }

    async fn clear_range(&self, spreadsheet_id: &str, address: &str) -> Result<()> {
        let range = RangeRef::parse(address)?;
        self.with_sheet_mut(spreadsheet_id, &range, |sheet| {
            for (r, row) in sheet.cells.iter_mut().enumerate().skip(range.first_row) {
                if range.last_row.is_some_and(|last| r > last) {
                    break;
                }
                for (c, cell) in row.iter_mut().enumerate().skip(range.first_col) {
                    if range.last_col.is_some_and(|last| c > last) {
                        break;
                    }
                    cell.clear();
                }
            }
            Ok(())
        })?;
        tracing::debug!("Cleared {address}");
        Ok(())
    }

    async fn batch_update(&self, spreadsheet_id: &str, operations: Vec<SheetOperation>) -> Result<()> {
        let mut state = self.lock();
        let spreadsheet = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(StoreError::not_found)?;

        // All or nothing
        let mut updated = spreadsheet.clone();
        for op in operations {
            updated.apply(op)?;
        }
        updated.modified = Utc::now();
        *spreadsheet = updated;
        Ok(())
    }

    async fn spreadsheet(&self, spreadsheet_id: &str) -> Result<SpreadsheetInfo> {
        self.lock()
            .spreadsheets
            .get(spreadsheet_id)
            .map(|s| s.info(spreadsheet_id))
            .ok_or_else(StoreError::not_found)
    }

    async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let mut state = self.lock();
        state.created += 1;
        let id = format!("mem-{}", state.created);

        let mut spreadsheet = SpreadsheetData::new(title);
        spreadsheet.sheets.push(SheetData {
            sheet_id: 0,
            title: "Sheet1".to_string(),
            cells: Vec::new(),
        });
        state.spreadsheets.insert(id.clone(), spreadsheet);
        tracing::info!("Created new spreadsheet: {id}");
        Ok(id)
    }

    async fn delete_spreadsheet(&self, spreadsheet_id: &str) -> Result<()> {
        self.lock()
            .spreadsheets
            .remove(spreadsheet_id)
            .map(|_| ())
            .ok_or_else(StoreError::not_found)
    }

    async fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetFile>> {
        let state = self.lock();
        let mut entries: Vec<_> = state.spreadsheets.iter().collect();
        entries.sort_by(|a, b| b.1.modified.cmp(&a.1.modified));

        Ok(entries
            .into_iter()
            .map(|(id, s)| SpreadsheetFile {
                id: id.clone(),
                name: s.title.clone(),
                created_time: timestamp(s.created),
                modified_time: timestamp(s.modified),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(data: &[&[&str]]) -> CellMatrix {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn staff() -> MemoryStore {
        MemoryStore::new().with_sheet(
            "book",
            "Staff",
            rows(&[&["Name", "Age"], &["Ann", "31"], &["Bob", "25"]]),
        )
    }

    #[test]
    fn test_parse_range_forms() {
        let whole = RangeRef::parse("Sheet1").unwrap();
        assert_eq!(whole.first_row, 0);
        assert_eq!(whole.last_row, None);
        assert_eq!(whole.last_col, None);

        let cols = RangeRef::parse("Sheet1!B:D").unwrap();
        assert_eq!((cols.first_col, cols.last_col), (1, Some(3)));
        assert_eq!((cols.first_row, cols.last_row), (0, None));

        let row = RangeRef::parse("Sheet1!A3:C3").unwrap();
        assert_eq!((row.first_row, row.last_row), (2, Some(2)));
        assert_eq!((row.first_col, row.last_col), (0, Some(2)));

        let cell = RangeRef::parse("'My Sheet'!BA7").unwrap();
        assert_eq!(cell.sheet, "My Sheet");
        assert_eq!((cell.first_col, cell.last_col), (26, Some(26)));
        assert_eq!((cell.first_row, cell.last_row), (6, Some(6)));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeRef::parse("Sheet1!A0").is_err());
        assert!(RangeRef::parse("Sheet1!C1:A1").is_err());
        assert!(RangeRef::parse("!A1").is_err());
        assert!(RangeRef::parse("Sheet1!:").is_err());
    }

    #[test]
    fn test_decode_matches_encoder() {
        for index in [0, 1, 25, 26, 27, 51, 52, 675, 676, 1000] {
            let letters = sheetbridge_core::encode_column(index);
            assert_eq!(decode_column(&letters), Some(index), "{letters}");
        }
    }

    #[tokio::test]
    async fn test_read_trims_trailing_keeps_leading() {
        let store = MemoryStore::new().with_sheet(
            "book",
            "Sheet1",
            rows(&[&[], &["", "ID", "Name", ""], &["", "1", "Ann"], &[""], &[]]),
        );

        let matrix = store.read_range("book", "Sheet1").await.unwrap();
        assert_eq!(
            matrix,
            rows(&[&[], &["", "ID", "Name"], &["", "1", "Ann"]])
        );

        let column = store.read_range("book", "Sheet1!C:C").await.unwrap();
        assert_eq!(column, rows(&[&[], &["Name"], &["Ann"]]));
    }

    #[tokio::test]
    async fn test_write_pads_sheet() {
        let store = staff();
        store
            .write_range("book", "Staff!D5:E5", &rows(&[&["x", "y"]]))
            .await
            .unwrap();

        let cells = store.sheet_cells("book", "Staff").unwrap();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[3], Vec::<String>::new());
        assert_eq!(cells[4], rows(&[&["", "", "", "x", "y"]])[0]);
    }

    #[tokio::test]
    async fn test_write_outside_range_is_rejected() {
        let store = staff();
        let err = store
            .write_range("book", "Staff!A2:B2", &rows(&[&["a", "b", "c"]]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));

        let cells = store.sheet_cells("book", "Staff").unwrap();
        assert_eq!(cells[1], vec!["Ann".to_string(), "31".to_string()]);
    }

    #[tokio::test]
    async fn test_append_after_last_row() {
        let store = MemoryStore::new().with_sheet(
            "book",
            "Staff",
            rows(&[&["Name", "Age"], &["Ann", "31"], &["", ""]]),
        );
        store
            .append_range("book", "Staff!A:C", &rows(&[&["Cy", "40"], &["Di", "22"]]))
            .await
            .unwrap();

        let matrix = store.read_range("book", "Staff").await.unwrap();
        assert_eq!(
            matrix,
            rows(&[&["Name", "Age"], &["Ann", "31"], &["Cy", "40"], &["Di", "22"]])
        );
    }

    #[tokio::test]
    async fn test_clear_row() {
        let store = staff();
        store.clear_range("book", "Staff!A2:B2").await.unwrap();

        let matrix = store.read_range("book", "Staff").await.unwrap();
        assert_eq!(matrix, rows(&[&["Name", "Age"], &[], &["Bob", "25"]]));
    }

    #[tokio::test]
    async fn test_missing_entities() {
        let store = staff();

        let err = store.read_range("nope", "Staff").await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let err = store.read_range("book", "Other").await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        assert!(store.delete_spreadsheet("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_batch_update_is_atomic() {
        let store = staff();
        let err = store
            .batch_update(
                "book",
                vec![
                    SheetOperation::AddSheet {
                        title: "Archive".into(),
                    },
                    SheetOperation::DeleteSheet { sheet_id: 99 },
                ],
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));

        let info = store.spreadsheet("book").await.unwrap();
        assert_eq!(info.sheets.len(), 1);
    }

    #[tokio::test]
    async fn test_sheet_lifecycle() {
        let store = MemoryStore::new();
        let id = store.create_spreadsheet("Roster").await.unwrap();

        store
            .batch_update(
                &id,
                vec![SheetOperation::AddSheet {
                    title: "Archive".into(),
                }],
            )
            .await
            .unwrap();
        let info = store.spreadsheet(&id).await.unwrap();
        assert_eq!(info.title, "Roster");
        assert_eq!(
            info.sheets
                .iter()
                .map(|s| (s.sheet_id, s.title.as_str(), s.index))
                .collect::<Vec<_>>(),
            vec![(0, "Sheet1", 0), (1, "Archive", 1)]
        );

        store
            .batch_update(
                &id,
                vec![
                    SheetOperation::RenameSheet {
                        sheet_id: 1,
                        title: "Old".into(),
                    },
                    SheetOperation::DeleteSheet { sheet_id: 0 },
                ],
            )
            .await
            .unwrap();
        let info = store.spreadsheet(&id).await.unwrap();
        assert_eq!(info.sheets.len(), 1);
        assert_eq!(info.sheets[0].title, "Old");
        assert_eq!(info.sheets[0].index, 0);

        let err = store
            .batch_update(&id, vec![SheetOperation::DeleteSheet { sheet_id: 1 }])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_fixture_and_listing() {
        let store = MemoryStore::from_json(
            r#"{"spreadsheets": [
                {"id": "a", "title": "Alpha", "sheets": [{"title": "S", "rows": [["ID", "Score"], [1, 9.5]]}]},
                {"id": "b", "sheets": []}
            ]}"#,
        )
        .unwrap();

        let matrix = store.read_range("a", "S").await.unwrap();
        assert_eq!(matrix, rows(&[&["ID", "Score"], &["1", "9.5"]]));

        let files = store.list_spreadsheets().await.unwrap();
        assert_eq!(files.len(), 2);
        let b = files.iter().find(|f| f.id == "b").unwrap();
        assert_eq!(b.name, "b");
        assert!(b.modified_time.ends_with('Z'));
    }
}
