//! Create, update, and delete operations against an in-memory store

use pretty_assertions::assert_eq;
use sheetbridge::prelude::*;

fn rows(data: &[&[&str]]) -> CellMatrix {
    data.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// A table occupying B2:D5
fn service() -> SheetService<MemoryStore> {
    let store = MemoryStore::new()
        .with_sheet(
            "roster",
            "Staff",
            rows(&[
                &[],
                &["", "ID", "Name", "Email"],
                &["", "1", "Ann", "ann@x.com"],
                &["", "2", "Bob", "bob@y.org"],
                &["", "3", "Cy", "cy@x.com"],
            ]),
        )
        .with_sheet("roster", "Empty", Vec::new());
    SheetService::new(store)
}

async fn staff(svc: &SheetService<MemoryStore>) -> CellMatrix {
    svc.get_sheet_data(&SheetRequest::new("roster", "Staff"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_data_appends_within_table_columns() {
    let svc = service();
    let ack = svc
        .create_data(&CreateDataRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Staff".into(),
            rows: rows(&[&["4", "Di", "di@x.com"]]),
        })
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Insert successfully!"));

    let raw = svc.store().sheet_cells("roster", "Staff").unwrap();
    assert_eq!(raw[5], vec!["", "4", "Di", "di@x.com"]);
    assert_eq!(staff(&svc).await.len(), 5);
}

#[tokio::test]
async fn test_create_data_on_empty_sheet() {
    let svc = service();
    svc.create_data(&CreateDataRequest {
        spreadsheet_id: "roster".into(),
        sheet_name: "Empty".into(),
        rows: rows(&[&["ID", "Name"], &["1", "Ann"]]),
    })
    .await
    .unwrap();

    let data = svc
        .get_sheet_data(&SheetRequest::new("roster", "Empty"))
        .await
        .unwrap();
    assert_eq!(data, rows(&[&["ID", "Name"], &["1", "Ann"]]));
}

#[tokio::test]
async fn test_update_data_row() {
    let svc = service();
    let req: UpdateDataRowRequest = serde_json::from_str(
        r#"{
            "spreadsheetID": "roster",
            "sheetName": "Staff",
            "rows": [["1", "Ann", "ann@z.com"], ["3", "Cyrus", "cy@x.com"]],
            "range": ["3", 5]
        }"#,
    )
    .unwrap();
    svc.update_data_row(&req).await.unwrap();

    assert_eq!(
        staff(&svc).await,
        rows(&[
            &["ID", "Name", "Email"],
            &["1", "Ann", "ann@z.com"],
            &["2", "Bob", "bob@y.org"],
            &["3", "Cyrus", "cy@x.com"],
        ])
    );
}

#[tokio::test]
async fn test_update_data_row_rejects_mismatched_lengths() {
    let svc = service();
    let err = svc
        .update_data_row(&UpdateDataRowRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Staff".into(),
            rows: rows(&[&["1", "Ann", "ann@z.com"]]),
            range: vec![Coordinate::from("3"), Coordinate::from("4")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Nothing was written
    assert_eq!(staff(&svc).await[1], vec!["1", "Ann", "ann@x.com"]);
}

#[tokio::test]
async fn test_row_operations_on_empty_sheet() {
    let svc = service();
    let err = svc
        .update_data_row(&UpdateDataRowRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Empty".into(),
            rows: rows(&[&["x"]]),
            range: vec![Coordinate::from("1")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "sheet has no data");

    let err = svc
        .delete_data_row(&DeleteDataRowRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Empty".into(),
            range: vec![Coordinate::from("1")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_update_data_cell_uses_sheet_columns() {
    let svc = service();
    // Column 2 is C, the Name column of a table starting at B
    svc.update_data_cell(&UpdateDataCellRequest {
        spreadsheet_id: "roster".into(),
        sheet_name: "Staff".into(),
        cells: vec!["Robert".into()],
        range: vec![CellPosition::new("4", "2")],
    })
    .await
    .unwrap();

    assert_eq!(staff(&svc).await[2], vec!["2", "Robert", "bob@y.org"]);
}

#[tokio::test]
async fn test_update_data_cell_beyond_z() {
    let svc = service();
    svc.update_data_cell(&UpdateDataCellRequest {
        spreadsheet_id: "roster".into(),
        sheet_name: "Staff".into(),
        cells: vec!["far".into()],
        range: vec![CellPosition::new(1i64, 26i64)],
    })
    .await
    .unwrap();

    // Column 26 is addressed as BA
    let raw = svc.store().sheet_cells("roster", "Staff").unwrap();
    assert_eq!(raw[0].len(), 27);
    assert_eq!(raw[0][26], "far");
}

#[tokio::test]
async fn test_delete_data_row_clears_in_place() {
    let svc = service();
    let msg = svc
        .delete_data_row(&DeleteDataRowRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Staff".into(),
            range: vec![Coordinate::from("4")],
        })
        .await
        .unwrap();
    assert_eq!(msg.message.as_deref(), Some("Delete successfully!"));

    let data = staff(&svc).await;
    assert_eq!(data.len(), 4);
    assert!(data[2].is_empty());
    assert_eq!(data[3], vec!["3", "Cy", "cy@x.com"]);
}

#[tokio::test]
async fn test_delete_data_cell() {
    let svc = service();
    svc.delete_data_cell(&DeleteDataCellRequest {
        spreadsheet_id: "roster".into(),
        sheet_name: "Staff".into(),
        range: vec![CellPosition::new("3", "3"), CellPosition::new("5", "2")],
    })
    .await
    .unwrap();

    let data = staff(&svc).await;
    assert_eq!(data[1], vec!["1", "Ann"]);
    assert_eq!(data[3], vec!["3", "", "cy@x.com"]);
}

#[tokio::test]
async fn test_invalid_coordinates_are_rejected_before_writing() {
    let svc = service();
    let err = svc
        .delete_data_cell(&DeleteDataCellRequest {
            spreadsheet_id: "roster".into(),
            sheet_name: "Staff".into(),
            range: vec![CellPosition::new("3", "1"), CellPosition::new("0", "1")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(staff(&svc).await[1][0], "1");
}

#[tokio::test]
async fn test_spreadsheet_lifecycle() {
    let svc = SheetService::new(MemoryStore::new());

    let created = svc
        .create_spreadsheet(&CreateSpreadsheetRequest::default())
        .await
        .unwrap();
    assert_eq!(created.title.as_deref(), Some("New Spreadsheet"));
    let id = created.spreadsheet_id.unwrap();

    let renamed = svc
        .update_spreadsheet(&UpdateSpreadsheetRequest {
            spreadsheet_id: id.clone(),
            title: "Roster".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        renamed.message.as_deref(),
        Some("Spreadsheet title updated successfully")
    );

    let summary = svc
        .get_spreadsheet(&SpreadsheetRequest::new(id.as_str()))
        .await
        .unwrap();
    assert_eq!(summary.title, "Roster");

    svc.delete_spreadsheet(&SpreadsheetRequest::new(id.as_str()))
        .await
        .unwrap();
    let err = svc
        .get_spreadsheet(&SpreadsheetRequest::new(id.as_str()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_sheet_lifecycle() {
    let svc = SheetService::new(MemoryStore::new());
    let id = svc
        .create_spreadsheet(&CreateSpreadsheetRequest {
            title: "Roster".into(),
        })
        .await
        .unwrap()
        .spreadsheet_id
        .unwrap();

    let ack = svc
        .create_sheet(&SheetRequest::new(id.as_str(), "Archive"))
        .await
        .unwrap();
    assert_eq!(ack.sheet_name.as_deref(), Some("Archive"));

    // The default sheet has id 0, which must be accepted
    svc.update_sheet(&UpdateSheetRequest {
        spreadsheet_id: id.clone(),
        sheet_id: Some(0),
        new_sheet_name: "Current".into(),
    })
    .await
    .unwrap();

    let sheets = svc
        .get_sheets(&SpreadsheetRequest::new(id.as_str()))
        .await
        .unwrap();
    let archive = sheets
        .sheets
        .iter()
        .find(|s| s.sheet_name == "Archive")
        .unwrap()
        .sheet_id;
    assert_eq!(sheets.sheets[0].sheet_name, "Current");

    svc.delete_sheet(&DeleteSheetRequest {
        spreadsheet_id: id.clone(),
        sheet_id: Some(archive),
    })
    .await
    .unwrap();

    let sheets = svc
        .get_sheets(&SpreadsheetRequest::new(id.as_str()))
        .await
        .unwrap();
    assert_eq!(sheets.sheets.len(), 1);

    // Duplicate sheet names are rejected by the store
    let err = svc
        .create_sheet(&SheetRequest::new(id.as_str(), "Current"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
}
