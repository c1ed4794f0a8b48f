use sheetbridge_core::{cell_address, encode_column};
use sheetbridge_store::{SheetOperation, SheetStore};

use super::SheetService;
use crate::error::Result;
use crate::request::{UpdateDataCellRequest, UpdateDataRowRequest, UpdateSheetRequest, UpdateSpreadsheetRequest};
use crate::response::Acknowledgement;

impl<S: SheetStore> SheetService<S> {
    /// UpdateDataRow: overwrite whole table rows, one write per row
    pub async fn update_data_row(&self, req: &UpdateDataRowRequest) -> Result<Acknowledgement> {
        let updates = req.resolve()?;
        let span = self
            .occupied_span(&req.spreadsheet_id, &req.sheet_name)
            .await?;

        for (row, values) in updates {
            let address = span.row_address(&req.sheet_name, row);
            tracing::debug!("Updating {address}");
            self.store
                .write_range(&req.spreadsheet_id, &address, std::slice::from_ref(values))
                .await?;
        }
        Ok(Acknowledgement::message("Update successfully!"))
    }

    /// UpdateDataCell: overwrite single cells
    pub async fn update_data_cell(&self, req: &UpdateDataCellRequest) -> Result<Acknowledgement> {
        for (row, col, value) in req.resolve()? {
            let address = cell_address(&req.sheet_name, &encode_column(col), row);
            tracing::debug!("Updating {address}");
            self.store
                .write_range(&req.spreadsheet_id, &address, &[vec![value.to_string()]])
                .await?;
        }
        Ok(Acknowledgement::message("Update successfully!"))
    }

    /// UpdateSpreadsheet: change the spreadsheet's title
    pub async fn update_spreadsheet(&self, req: &UpdateSpreadsheetRequest) -> Result<Acknowledgement> {
        req.validate()?;
        self.store
            .batch_update(
                &req.spreadsheet_id,
                vec![SheetOperation::RenameSpreadsheet {
                    title: req.title.clone(),
                }],
            )
            .await?;
        tracing::info!("Renamed spreadsheet {} to {}", req.spreadsheet_id, req.title);

        Ok(Acknowledgement::for_spreadsheet(&req.spreadsheet_id)
            .with_title(&req.title)
            .with_message("Spreadsheet title updated successfully"))
    }

    /// UpdateSheet: change a sheet's title
    pub async fn update_sheet(&self, req: &UpdateSheetRequest) -> Result<Acknowledgement> {
        let sheet_id = req.resolve()?;
        self.store
            .batch_update(
                &req.spreadsheet_id,
                vec![SheetOperation::RenameSheet {
                    sheet_id,
                    title: req.new_sheet_name.clone(),
                }],
            )
            .await?;
        tracing::info!(
            "Renamed sheet {sheet_id} of {} to {}",
            req.spreadsheet_id,
            req.new_sheet_name
        );

        Ok(Acknowledgement::for_spreadsheet(&req.spreadsheet_id)
            .with_sheet_id(sheet_id)
            .with_new_sheet_name(&req.new_sheet_name)
            .with_message("Sheet updated successfully"))
    }
}
