use sheetbridge_core::sheet_span_address;
use sheetbridge_store::{SheetOperation, SheetStore};

use super::SheetService;
use crate::error::Result;
use crate::request::{CreateDataRequest, CreateSpreadsheetRequest, SheetRequest};
use crate::response::Acknowledgement;

const DEFAULT_TITLE: &str = "New Spreadsheet";

impl<S: SheetStore> SheetService<S> {
    /// CreateData: append rows below the sheet's table
    pub async fn create_data(&self, req: &CreateDataRequest) -> Result<Acknowledgement> {
        req.validate()?;
        let located = self.located(&req.spreadsheet_id, &req.sheet_name).await?;
        let address = match &located.range {
            Some(span) => sheet_span_address(&req.sheet_name, span),
            None => req.sheet_name.clone(),
        };

        self.store
            .append_range(&req.spreadsheet_id, &address, &req.rows)
            .await?;
        tracing::info!(
            "Appended {} row(s) to {} at {address}",
            req.rows.len(),
            req.spreadsheet_id
        );
        Ok(Acknowledgement::message("Insert successfully!"))
    }

    /// CreateSpreadsheet: a new spreadsheet with a single "Sheet1"
    pub async fn create_spreadsheet(&self, req: &CreateSpreadsheetRequest) -> Result<Acknowledgement> {
        let title = if req.title.is_empty() {
            DEFAULT_TITLE
        } else {
            req.title.as_str()
        };

        let spreadsheet_id = self.store.create_spreadsheet(title).await?;
        Ok(Acknowledgement::for_spreadsheet(spreadsheet_id).with_title(title))
    }

    /// CreateSheet: add a sheet to an existing spreadsheet
    pub async fn create_sheet(&self, req: &SheetRequest) -> Result<Acknowledgement> {
        req.validate()?;
        self.store
            .batch_update(
                &req.spreadsheet_id,
                vec![SheetOperation::AddSheet {
                    title: req.sheet_name.clone(),
                }],
            )
            .await?;
        tracing::info!("Added sheet {} to {}", req.sheet_name, req.spreadsheet_id);

        Ok(Acknowledgement::for_spreadsheet(&req.spreadsheet_id)
            .with_sheet_name(&req.sheet_name)
            .with_message("Sheet created successfully"))
    }
}
