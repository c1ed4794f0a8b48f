use sheetbridge_core::{cell_address, encode_column};
use sheetbridge_store::{SheetOperation, SheetStore};

use super::SheetService;
use crate::error::Result;
use crate::request::{DeleteDataCellRequest, DeleteDataRowRequest, DeleteSheetRequest, SpreadsheetRequest};
use crate::response::Acknowledgement;

impl<S: SheetStore> SheetService<S> {
    /// DeleteDataRow: clear whole table rows. The rows stay in place, emptied.
    pub async fn delete_data_row(&self, req: &DeleteDataRowRequest) -> Result<Acknowledgement> {
        let rows = req.resolve()?;
        let span = self
            .occupied_span(&req.spreadsheet_id, &req.sheet_name)
            .await?;

        for row in rows {
            let address = span.row_address(&req.sheet_name, row);
            tracing::debug!("Clearing {address}");
            self.store.clear_range(&req.spreadsheet_id, &address).await?;
        }
        Ok(Acknowledgement::message("Delete successfully!"))
    }

    /// DeleteDataCell: clear single cells
    pub async fn delete_data_cell(&self, req: &DeleteDataCellRequest) -> Result<Acknowledgement> {
        for (row, col) in req.resolve()? {
            let address = cell_address(&req.sheet_name, &encode_column(col), row);
            tracing::debug!("Clearing {address}");
            self.store.clear_range(&req.spreadsheet_id, &address).await?;
        }
        Ok(Acknowledgement::message("Delete successfully!"))
    }

    /// DeleteSpreadsheet: remove the spreadsheet file
    pub async fn delete_spreadsheet(&self, req: &SpreadsheetRequest) -> Result<Acknowledgement> {
        req.validate()?;
        self.store.delete_spreadsheet(&req.spreadsheet_id).await?;

        Ok(Acknowledgement::for_spreadsheet(&req.spreadsheet_id)
            .with_message("Spreadsheet deleted successfully"))
    }

    /// DeleteSheet: remove one sheet by id
    pub async fn delete_sheet(&self, req: &DeleteSheetRequest) -> Result<Acknowledgement> {
        let sheet_id = req.resolve()?;
        self.store
            .batch_update(
                &req.spreadsheet_id,
                vec![SheetOperation::DeleteSheet { sheet_id }],
            )
            .await?;
        tracing::info!("Deleted sheet {sheet_id} of {}", req.spreadsheet_id);

        Ok(Acknowledgement::for_spreadsheet(&req.spreadsheet_id)
            .with_sheet_id(sheet_id)
            .with_message("Sheet deleted successfully"))
    }
}
