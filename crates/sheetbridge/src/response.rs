//! Response bodies, serialized with the JSON field names of the HTTP API.

use serde::Serialize;
use sheetbridge_store::{SheetInfo, SpreadsheetFile, SpreadsheetInfo};

/// One sheet of a spreadsheet, as listed by GetSheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    #[serde(rename = "sheetID")]
    pub sheet_id: i64,
    pub sheet_name: String,
    pub sheet_index: i64,
}

impl From<SheetInfo> for SheetSummary {
    fn from(sheet: SheetInfo) -> Self {
        Self {
            sheet_id: sheet.sheet_id,
            sheet_name: sheet.title,
            sheet_index: sheet.index,
        }
    }
}

/// GetSheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetList {
    #[serde(rename = "spreadsheetID")]
    pub spreadsheet_id: String,
    pub sheets: Vec<SheetSummary>,
}

/// ListAllSpreadsheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadsheetList {
    pub spreadsheets: Vec<SpreadsheetFile>,
}

/// GetSpreadsheetById
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadsheetSummary {
    pub id: String,
    pub title: String,
}

impl From<SpreadsheetInfo> for SpreadsheetSummary {
    fn from(info: SpreadsheetInfo) -> Self {
        Self {
            id: info.id,
            title: info.title,
        }
    }
}

/// Confirmation returned by mutating operations.
///
/// Only the fields relevant to the operation are set; the rest are omitted
/// from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    #[serde(rename = "spreadsheetID", skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "sheetID", skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn for_spreadsheet<S: Into<String>>(spreadsheet_id: S) -> Self {
        Self {
            spreadsheet_id: Some(spreadsheet_id.into()),
            ..Default::default()
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sheet_id(mut self, sheet_id: i64) -> Self {
        self.sheet_id = Some(sheet_id);
        self
    }

    pub fn with_sheet_name<S: Into<String>>(mut self, sheet_name: S) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn with_new_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.new_sheet_name = Some(name.into());
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sheet_list_json() {
        let list = SheetList {
            spreadsheet_id: "abc".into(),
            sheets: vec![SheetSummary::from(SheetInfo {
                sheet_id: 42,
                title: "Archive".into(),
                index: 1,
            })],
        };
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({
                "spreadsheetID": "abc",
                "sheets": [{"sheetID": 42, "sheetName": "Archive", "sheetIndex": 1}]
            })
        );
    }

    #[test]
    fn test_acknowledgement_omits_unset_fields() {
        let ack = Acknowledgement::for_spreadsheet("abc")
            .with_sheet_id(7)
            .with_new_sheet_name("Old")
            .with_message("Sheet updated successfully");
        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({
                "spreadsheetID": "abc",
                "sheetID": 7,
                "newSheetName": "Old",
                "message": "Sheet updated successfully"
            })
        );

        assert_eq!(
            serde_json::to_value(Acknowledgement::message("Insert successfully!")).unwrap(),
            json!({"message": "Insert successfully!"})
        );
    }
}
