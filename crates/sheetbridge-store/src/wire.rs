//! JSON shapes of the Sheets v4, Drive v3, and OAuth token endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetbridge_core::{CellMatrix, Row};

use crate::store::{SheetInfo, SheetOperation, SpreadsheetFile, SpreadsheetInfo};

/// `ValueRange` as returned by `values.get`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Cells as text: strings as-is, numbers and booleans printed, null as empty
    pub fn into_matrix(self) -> CellMatrix {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

pub(crate) fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// `ValueRange` request body for `values.update` / `values.append`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRangeBody<'a> {
    pub major_dimension: &'static str,
    pub values: &'a [Row],
}

impl<'a> ValueRangeBody<'a> {
    pub fn rows(values: &'a [Row]) -> Self {
        Self {
            major_dimension: "ROWS",
            values,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
}

/// `Spreadsheet` resource (only the fields sheetbridge asks for)
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Spreadsheet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Body for `spreadsheets.create`: the title plus one "Sheet1" tab
    pub fn new_with_title(title: &str) -> Self {
        Self {
            spreadsheet_id: String::new(),
            properties: SpreadsheetProperties {
                title: title.to_string(),
            },
            sheets: vec![Sheet {
                properties: SheetProperties {
                    title: "Sheet1".to_string(),
                    ..Default::default()
                },
            }],
        }
    }

    pub fn into_info(self) -> SpreadsheetInfo {
        SpreadsheetInfo {
            id: self.spreadsheet_id,
            title: self.properties.title,
            sheets: self
                .sheets
                .into_iter()
                .map(|sheet| SheetInfo {
                    sheet_id: sheet.properties.sheet_id.unwrap_or(0),
                    title: sheet.properties.title,
                    index: sheet.properties.index.unwrap_or(0),
                })
                .collect(),
        }
    }
}

/// Body of `spreadsheets.batchUpdate`
#[derive(Debug, Serialize)]
pub(crate) struct BatchUpdateBody {
    pub requests: Vec<BatchRequest>,
}

impl BatchUpdateBody {
    pub fn new(operations: Vec<SheetOperation>) -> Self {
        Self {
            requests: operations.into_iter().map(BatchRequest::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum BatchRequest {
    AddSheet(AddSheet),
    DeleteSheet(DeleteSheet),
    UpdateSheetProperties(UpdateSheetProperties),
    UpdateSpreadsheetProperties(UpdateSpreadsheetProperties),
}

#[derive(Debug, Serialize)]
pub(crate) struct AddSheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteSheet {
    pub sheet_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateSheetProperties {
    pub properties: SheetProperties,
    pub fields: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateSpreadsheetProperties {
    pub properties: SpreadsheetProperties,
    pub fields: &'static str,
}

impl From<SheetOperation> for BatchRequest {
    fn from(op: SheetOperation) -> Self {
        match op {
            SheetOperation::AddSheet { title } => BatchRequest::AddSheet(AddSheet {
                properties: SheetProperties {
                    title,
                    ..Default::default()
                },
            }),
            SheetOperation::DeleteSheet { sheet_id } => {
                BatchRequest::DeleteSheet(DeleteSheet { sheet_id })
            }
            SheetOperation::RenameSheet { sheet_id, title } => {
                BatchRequest::UpdateSheetProperties(UpdateSheetProperties {
                    properties: SheetProperties {
                        sheet_id: Some(sheet_id),
                        title,
                        index: None,
                    },
                    fields: "title",
                })
            }
            SheetOperation::RenameSpreadsheet { title } => {
                BatchRequest::UpdateSpreadsheetProperties(UpdateSpreadsheetProperties {
                    properties: SpreadsheetProperties { title },
                    fields: "title",
                })
            }
        }
    }
}

/// Drive `files.list` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub modified_time: String,
}

impl From<DriveFile> for SpreadsheetFile {
    fn from(file: DriveFile) -> Self {
        SpreadsheetFile {
            id: file.id,
            name: file.name,
            created_time: file.created_time,
            modified_time: file.modified_time,
        }
    }
}

/// Google's error envelope: `{"error": {"code": 404, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_range_to_matrix() {
        let range: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:Z1000",
            "majorDimension": "ROWS",
            "values": [["ID", "Score"], [1, 9.5], [], ["x", null, true]]
        }))
        .unwrap();

        assert_eq!(
            range.into_matrix(),
            vec![
                vec!["ID".to_string(), "Score".to_string()],
                vec!["1".to_string(), "9.5".to_string()],
                vec![],
                vec!["x".to_string(), String::new(), "true".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_value_range() {
        let range: ValueRange =
            serde_json::from_value(json!({"range": "Sheet1!A1:Z1000", "majorDimension": "ROWS"}))
                .unwrap();
        assert!(range.into_matrix().is_empty());
    }

    #[test]
    fn test_batch_update_body() {
        let body = BatchUpdateBody::new(vec![
            SheetOperation::AddSheet {
                title: "New".into(),
            },
            SheetOperation::DeleteSheet { sheet_id: 7 },
            SheetOperation::RenameSheet {
                sheet_id: 7,
                title: "Renamed".into(),
            },
            SheetOperation::RenameSpreadsheet {
                title: "Book".into(),
            },
        ]);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "requests": [
                    {"addSheet": {"properties": {"title": "New"}}},
                    {"deleteSheet": {"sheetId": 7}},
                    {"updateSheetProperties": {
                        "properties": {"sheetId": 7, "title": "Renamed"},
                        "fields": "title"
                    }},
                    {"updateSpreadsheetProperties": {
                        "properties": {"title": "Book"},
                        "fields": "title"
                    }}
                ]
            })
        );
    }

    #[test]
    fn test_create_body() {
        assert_eq!(
            serde_json::to_value(Spreadsheet::new_with_title("Staff")).unwrap(),
            json!({
                "properties": {"title": "Staff"},
                "sheets": [{"properties": {"title": "Sheet1"}}]
            })
        );
    }

    #[test]
    fn test_spreadsheet_info() {
        let sheet: Spreadsheet = serde_json::from_value(json!({
            "spreadsheetId": "abc",
            "properties": {"title": "Staff"},
            "sheets": [
                {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
                {"properties": {"sheetId": 42, "title": "Archive", "index": 1}}
            ]
        }))
        .unwrap();

        let info = sheet.into_info();
        assert_eq!(info.id, "abc");
        assert_eq!(info.title, "Staff");
        assert_eq!(info.sheets[1].sheet_id, 42);
        assert_eq!(info.sheets[1].title, "Archive");
        assert_eq!(info.sheets[1].index, 1);
    }
}
