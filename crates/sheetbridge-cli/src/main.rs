//! Sheetbridge CLI - spreadsheet data operations from the command line

mod config;
mod route;

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use sheetbridge::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::route::respond;

#[derive(Parser)]
#[command(name = "sheetbridge")]
#[command(
    author,
    version,
    about = "Read, filter and edit spreadsheet data stored in Google Sheets"
)]
struct Cli {
    /// Config file (default: sheetbridge.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// OAuth client secret file (overrides config and SHEETBRIDGE_CREDENTIALS)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,

    /// Cached OAuth token file (overrides config and SHEETBRIDGE_TOKEN)
    #[arg(long, global = true)]
    token: Option<PathBuf>,

    /// Run against an in-memory store loaded from a JSON fixture instead of Google Sheets
    #[arg(long, global = true, value_name = "FIXTURE")]
    memory: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize access: prints the consent URL, or exchanges CODE for a token
    Auth {
        /// Authorization code from the consent page
        code: Option<String>,
    },

    /// Run an operation by route name with a JSON request body
    Call {
        /// Route name, e.g. GetByFilter
        route: String,

        /// JSON body (default: read from stdin; "-" also reads stdin)
        body: Option<String>,
    },

    /// Trimmed data of every sheet
    GetAll { spreadsheet_id: String },

    /// Trimmed data of one sheet
    GetSheetData {
        spreadsheet_id: String,
        sheet_name: String,
    },

    /// Header and values of one column
    GetByColumn {
        spreadsheet_id: String,
        sheet_name: String,
        column_name: String,
    },

    /// Rows whose column satisfies OPERATOR VALUE (=, >, < for numbers, contain for text)
    GetByFilter {
        spreadsheet_id: String,
        sheet_name: String,
        column_name: String,
        operator: String,
        value: String,
    },

    /// Sheets of a spreadsheet
    GetSheets { spreadsheet_id: String },

    /// Every spreadsheet, newest modification first
    #[command(alias = "ls")]
    ListSpreadsheets,

    /// Spreadsheet id and title
    GetSpreadsheet { spreadsheet_id: String },

    /// Append rows below the sheet's table
    CreateData {
        spreadsheet_id: String,
        sheet_name: String,

        /// Row as a JSON array, e.g. '["4", "Di", "di@x.com"]' (repeatable)
        #[arg(short, long = "row", required = true)]
        rows: Vec<String>,
    },

    /// Create a spreadsheet with one sheet "Sheet1"
    CreateSpreadsheet {
        /// Title (default: "New Spreadsheet")
        title: Option<String>,
    },

    /// Add a sheet
    CreateSheet {
        spreadsheet_id: String,
        sheet_name: String,
    },

    /// Overwrite table rows; the Nth --row goes to the Nth --at
    UpdateDataRow {
        spreadsheet_id: String,
        sheet_name: String,

        /// Row as a JSON array (repeatable)
        #[arg(short, long = "row", required = true)]
        rows: Vec<String>,

        /// 1-based sheet row number (repeatable)
        #[arg(short, long = "at", required = true)]
        at: Vec<String>,
    },

    /// Overwrite single cells given as ROW,COL=VALUE (1-based row, 0-based column)
    UpdateDataCell {
        spreadsheet_id: String,
        sheet_name: String,

        #[arg(short, long = "cell", required = true, value_parser = parse_cell_update)]
        cells: Vec<(String, String, String)>,
    },

    /// Rename a spreadsheet
    UpdateSpreadsheet {
        spreadsheet_id: String,
        title: String,
    },

    /// Rename a sheet
    UpdateSheet {
        spreadsheet_id: String,
        sheet_id: i64,
        new_sheet_name: String,
    },

    /// Clear table rows, leaving them in place
    DeleteDataRow {
        spreadsheet_id: String,
        sheet_name: String,

        /// 1-based sheet row numbers
        #[arg(required = true)]
        rows: Vec<String>,
    },

    /// Clear single cells given as ROW,COL (1-based row, 0-based column)
    DeleteDataCell {
        spreadsheet_id: String,
        sheet_name: String,

        #[arg(required = true, value_parser = parse_cell_position)]
        cells: Vec<(String, String)>,
    },

    /// Delete a spreadsheet
    DeleteSpreadsheet { spreadsheet_id: String },

    /// Delete a sheet by id
    DeleteSheet {
        spreadsheet_id: String,
        sheet_id: i64,
    },
}

fn parse_cell_position(s: &str) -> std::result::Result<(String, String), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    Ok((row.trim().to_string(), col.trim().to_string()))
}

fn parse_cell_update(s: &str) -> std::result::Result<(String, String, String), String> {
    let (position, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROW,COL=VALUE, got '{s}'"))?;
    let (row, col) = parse_cell_position(position)?;
    Ok((row, col, value.to_string()))
}

fn parse_rows(rows: &[String]) -> Result<Vec<Value>> {
    rows.iter()
        .map(|row| {
            serde_json::from_str::<Value>(row)
                .ok()
                .filter(Value::is_array)
                .ok_or_else(|| anyhow!("Row must be a JSON array: {row}"))
        })
        .collect()
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sheetbridge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let output = match &cli.memory {
        Some(fixture) => {
            let store = MemoryStore::from_fixture(fixture)
                .with_context(|| format!("Failed to load fixture '{}'", fixture.display()))?;
            run(&SheetService::new(store), cli.command).await?
        }
        None => {
            let overrides = config::Overrides {
                credentials: cli.credentials,
                token: cli.token,
            };
            let config = config::load(cli.config.as_deref(), overrides, |key| {
                std::env::var(key).ok()
            })?;

            if let Commands::Auth { code } = cli.command {
                return auth(&config, code).await;
            }

            let store = GoogleSheetsStore::connect(config)
                .await
                .context("Failed to connect to Google Sheets")?;
            run(&SheetService::new(store), cli.command).await?
        }
    };

    print_json(&output, cli.pretty)
}

async fn auth(config: &StoreConfig, code: Option<String>) -> Result<()> {
    match code {
        None => {
            let url = GoogleSheetsStore::authorization_url(config).with_context(|| {
                format!(
                    "Failed to read client secret '{}'",
                    config.credentials_path.display()
                )
            })?;
            eprintln!("Open this URL, grant access, then run `sheetbridge auth <CODE>`:");
            println!("{url}");
        }
        Some(code) => {
            GoogleSheetsStore::authorize(config, &code)
                .await
                .context("Failed to exchange authorization code")?;
            eprintln!("Saved token to '{}'", config.token_path.display());
        }
    }
    Ok(())
}

fn read_body(body: Option<String>) -> Result<String> {
    match body.as_deref() {
        Some(body) if body != "-" => Ok(body.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request body from stdin")?;
            Ok(buf)
        }
    }
}

async fn run<S: SheetStore>(svc: &SheetService<S>, command: Commands) -> Result<Value> {
    match command {
        Commands::Auth { .. } => Err(anyhow!("auth cannot be used with --memory")),
        Commands::Call { route, body } => route::call(svc, &route, &read_body(body)?).await,
        Commands::GetAll { spreadsheet_id } => respond(
            "GetAll",
            svc.get_all(&SpreadsheetRequest::new(spreadsheet_id)).await,
        ),
        Commands::GetSheetData {
            spreadsheet_id,
            sheet_name,
        } => respond(
            "GetSheetData",
            svc.get_sheet_data(&SheetRequest::new(spreadsheet_id, sheet_name))
                .await,
        ),
        Commands::GetByColumn {
            spreadsheet_id,
            sheet_name,
            column_name,
        } => {
            let req = ColumnRequest {
                spreadsheet_id,
                sheet_name,
                column_name,
            };
            respond("GetByColumn", svc.get_by_column(&req).await)
        }
        Commands::GetByFilter {
            spreadsheet_id,
            sheet_name,
            column_name,
            operator,
            value,
        } => {
            let req = FilterRequest {
                spreadsheet_id,
                sheet_name,
                column_name,
                operator,
                value,
            };
            respond("GetByFilter", svc.get_by_filter(&req).await)
        }
        Commands::GetSheets { spreadsheet_id } => respond(
            "GetSheets",
            svc.get_sheets(&SpreadsheetRequest::new(spreadsheet_id)).await,
        ),
        Commands::ListSpreadsheets => {
            respond("ListAllSpreadsheets", svc.list_spreadsheets().await)
        }
        Commands::GetSpreadsheet { spreadsheet_id } => respond(
            "GetSpreadsheetById",
            svc.get_spreadsheet(&SpreadsheetRequest::new(spreadsheet_id))
                .await,
        ),
        Commands::CreateData {
            spreadsheet_id,
            sheet_name,
            rows,
        } => {
            let req: CreateDataRequest = serde_json::from_value(json!({
                "spreadsheetID": spreadsheet_id,
                "sheetName": sheet_name,
                "rows": parse_rows(&rows)?,
            }))?;
            respond("CreateData", svc.create_data(&req).await)
        }
        Commands::CreateSpreadsheet { title } => {
            let req = CreateSpreadsheetRequest {
                title: title.unwrap_or_default(),
            };
            respond("CreateSpreadsheet", svc.create_spreadsheet(&req).await)
        }
        Commands::CreateSheet {
            spreadsheet_id,
            sheet_name,
        } => respond(
            "CreateSheet",
            svc.create_sheet(&SheetRequest::new(spreadsheet_id, sheet_name))
                .await,
        ),
        Commands::UpdateDataRow {
            spreadsheet_id,
            sheet_name,
            rows,
            at,
        } => {
            let req: UpdateDataRowRequest = serde_json::from_value(json!({
                "spreadsheetID": spreadsheet_id,
                "sheetName": sheet_name,
                "rows": parse_rows(&rows)?,
                "range": at,
            }))?;
            respond("UpdateDataRow", svc.update_data_row(&req).await)
        }
        Commands::UpdateDataCell {
            spreadsheet_id,
            sheet_name,
            cells,
        } => {
            let mut req = UpdateDataCellRequest {
                spreadsheet_id,
                sheet_name,
                ..Default::default()
            };
            for (row, col, value) in cells {
                req.range.push(CellPosition::new(row.as_str(), col.as_str()));
                req.cells.push(value);
            }
            respond("UpdateDataCell", svc.update_data_cell(&req).await)
        }
        Commands::UpdateSpreadsheet {
            spreadsheet_id,
            title,
        } => {
            let req = UpdateSpreadsheetRequest {
                spreadsheet_id,
                title,
            };
            respond("UpdateSpreadsheet", svc.update_spreadsheet(&req).await)
        }
        Commands::UpdateSheet {
            spreadsheet_id,
            sheet_id,
            new_sheet_name,
        } => {
            let req = UpdateSheetRequest {
                spreadsheet_id,
                sheet_id: Some(sheet_id),
                new_sheet_name,
            };
            respond("UpdateSheet", svc.update_sheet(&req).await)
        }
        Commands::DeleteDataRow {
            spreadsheet_id,
            sheet_name,
            rows,
        } => {
            let req = DeleteDataRowRequest {
                spreadsheet_id,
                sheet_name,
                range: rows.iter().map(|r| Coordinate::from(r.as_str())).collect(),
            };
            respond("DeleteDataRow", svc.delete_data_row(&req).await)
        }
        Commands::DeleteDataCell {
            spreadsheet_id,
            sheet_name,
            cells,
        } => {
            let req = DeleteDataCellRequest {
                spreadsheet_id,
                sheet_name,
                range: cells
                    .iter()
                    .map(|(row, col)| CellPosition::new(row.as_str(), col.as_str()))
                    .collect(),
            };
            respond("DeleteDataCell", svc.delete_data_cell(&req).await)
        }
        Commands::DeleteSpreadsheet { spreadsheet_id } => respond(
            "DeleteSpreadsheet",
            svc.delete_spreadsheet(&SpreadsheetRequest::new(spreadsheet_id))
                .await,
        ),
        Commands::DeleteSheet {
            spreadsheet_id,
            sheet_id,
        } => {
            let req = DeleteSheetRequest {
                spreadsheet_id,
                sheet_id: Some(sheet_id),
            };
            respond("DeleteSheet", svc.delete_sheet(&req).await)
        }
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("Failed to write to stdout")?;
    Ok(())
}
