use sheetbridge_core::{evaluate, resolve_index, select_column, CellMatrix, Error, FilterSpec, Operator};
use sheetbridge_store::SheetStore;

use super::SheetService;
use crate::error::Result;
use crate::request::{ColumnRequest, FilterRequest, SheetRequest, SpreadsheetRequest};
use crate::response::{SheetList, SheetSummary, SpreadsheetList, SpreadsheetSummary};

impl<S: SheetStore> SheetService<S> {
    /// GetAll: the trimmed matrix of every sheet, in tab order.
    ///
    /// Serializes as `[sheet1_rows, sheet2_rows, ...]`; each sheet's rows are
    /// not wrapped in a further array (see [`get_sheet_data`](Self::get_sheet_data)).
    pub async fn get_all(&self, req: &SpreadsheetRequest) -> Result<Vec<CellMatrix>> {
        req.validate()?;
        let info = self.store.spreadsheet(&req.spreadsheet_id).await?;

        let mut all = Vec::with_capacity(info.sheets.len());
        for sheet in &info.sheets {
            let located = self.located(&req.spreadsheet_id, &sheet.title).await?;
            all.push(located.matrix);
        }
        Ok(all)
    }

    /// GetSheetData: the trimmed matrix of one sheet.
    ///
    /// Serializes as the bare row list `[["ID", ...], ["1", ...]]`. Earlier
    /// versions of the API wrapped it in one more array (`[[["ID", ...]]]`);
    /// clients that unwrapped the first element must read the rows directly.
    pub async fn get_sheet_data(&self, req: &SheetRequest) -> Result<CellMatrix> {
        req.validate()?;
        let located = self.located(&req.spreadsheet_id, &req.sheet_name).await?;
        Ok(located.matrix)
    }

    /// GetByColumn: the header cell followed by the column's values.
    ///
    /// Rows too short to reach the column are skipped.
    pub async fn get_by_column(&self, req: &ColumnRequest) -> Result<Vec<String>> {
        req.validate()?;
        let located = self.located(&req.spreadsheet_id, &req.sheet_name).await?;
        let header = located
            .header()
            .ok_or_else(|| Error::ColumnNotFound(req.column_name.clone()))?;
        let index = resolve_index(header, &req.column_name)?;
        Ok(select_column(&located.matrix, index))
    }

    /// GetByFilter: the header row followed by every matching row
    pub async fn get_by_filter(&self, req: &FilterRequest) -> Result<CellMatrix> {
        req.validate()?;
        let located = self.located(&req.spreadsheet_id, &req.sheet_name).await?;
        let spec = FilterSpec::new(
            req.column_name.as_str(),
            Operator::parse(&req.operator),
            req.value.as_str(),
        );

        let rows = evaluate(&located.matrix, &spec)?;
        tracing::debug!(
            "Filter {} {} {:?} kept {} of {} rows",
            spec.column,
            spec.operator,
            spec.comparand,
            rows.len().saturating_sub(1),
            located.matrix.len().saturating_sub(1)
        );
        Ok(rows)
    }

    /// GetSheets: id, name and index of every sheet
    pub async fn get_sheets(&self, req: &SpreadsheetRequest) -> Result<SheetList> {
        req.validate()?;
        let info = self.store.spreadsheet(&req.spreadsheet_id).await?;
        Ok(SheetList {
            spreadsheet_id: req.spreadsheet_id.clone(),
            sheets: info.sheets.into_iter().map(SheetSummary::from).collect(),
        })
    }

    /// ListAllSpreadsheets: every spreadsheet file, newest modification first
    pub async fn list_spreadsheets(&self) -> Result<SpreadsheetList> {
        let spreadsheets = self.store.list_spreadsheets().await?;
        Ok(SpreadsheetList { spreadsheets })
    }

    /// GetSpreadsheetById: id and title
    pub async fn get_spreadsheet(&self, req: &SpreadsheetRequest) -> Result<SpreadsheetSummary> {
        req.validate()?;
        let info = self.store.spreadsheet(&req.spreadsheet_id).await?;
        Ok(SpreadsheetSummary::from(info))
    }
}
