//! Route dispatch: run an operation by its HTTP route name with a JSON body.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sheetbridge::{SheetService, SheetStore};

/// Route names accepted by [`call`]
pub const ROUTES: &[&str] = &[
    "GetAll",
    "GetSheetData",
    "GetByColumn",
    "GetByFilter",
    "GetSheets",
    "ListAllSpreadsheets",
    "GetSpreadsheetById",
    "CreateData",
    "CreateSpreadsheet",
    "CreateSheet",
    "UpdateDataRow",
    "UpdateDataCell",
    "UpdateSpreadsheet",
    "UpdateSheet",
    "DeleteDataRow",
    "DeleteDataCell",
    "DeleteSpreadsheet",
    "DeleteSheet",
];

/// Convert an operation result to JSON, tagging failures with the route and
/// the HTTP status the error maps to.
pub fn respond<T: Serialize>(route: &str, result: sheetbridge::Result<T>) -> Result<Value> {
    match result {
        Ok(value) => Ok(serde_json::to_value(value)?),
        Err(e) => {
            let status = e.status_code();
            let kind = e.kind();
            tracing::debug!(route, status, %kind, error = %e, "request failed");
            Err(anyhow::Error::new(e).context(format!("{route} failed ({status} {kind})")))
        }
    }
}

fn body<T: DeserializeOwned>(route: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).with_context(|| format!("Invalid request body for {route}"))
}

/// Run `route` with a JSON request body
pub async fn call<S: SheetStore>(svc: &SheetService<S>, route: &str, json: &str) -> Result<Value> {
    let json = if json.trim().is_empty() { "{}" } else { json };
    tracing::debug!(route, "dispatching");
    match route {
        "GetAll" => respond(route, svc.get_all(&body(route, json)?).await),
        "GetSheetData" => respond(route, svc.get_sheet_data(&body(route, json)?).await),
        "GetByColumn" => respond(route, svc.get_by_column(&body(route, json)?).await),
        "GetByFilter" => respond(route, svc.get_by_filter(&body(route, json)?).await),
        "GetSheets" => respond(route, svc.get_sheets(&body(route, json)?).await),
        "ListAllSpreadsheets" => respond(route, svc.list_spreadsheets().await),
        "GetSpreadsheetById" => respond(route, svc.get_spreadsheet(&body(route, json)?).await),
        "CreateData" => respond(route, svc.create_data(&body(route, json)?).await),
        "CreateSpreadsheet" => respond(route, svc.create_spreadsheet(&body(route, json)?).await),
        "CreateSheet" => respond(route, svc.create_sheet(&body(route, json)?).await),
        "UpdateDataRow" => respond(route, svc.update_data_row(&body(route, json)?).await),
        "UpdateDataCell" => respond(route, svc.update_data_cell(&body(route, json)?).await),
        "UpdateSpreadsheet" => respond(route, svc.update_spreadsheet(&body(route, json)?).await),
        "UpdateSheet" => respond(route, svc.update_sheet(&body(route, json)?).await),
        "DeleteDataRow" => respond(route, svc.delete_data_row(&body(route, json)?).await),
        "DeleteDataCell" => respond(route, svc.delete_data_cell(&body(route, json)?).await),
        "DeleteSpreadsheet" => respond(route, svc.delete_spreadsheet(&body(route, json)?).await),
        "DeleteSheet" => respond(route, svc.delete_sheet(&body(route, json)?).await),
        other => bail!("Unknown route '{other}' (expected one of: {})", ROUTES.join(", ")),
    }
}
