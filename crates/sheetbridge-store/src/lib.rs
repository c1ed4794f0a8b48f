//! Remote tabular store for sheetbridge.
//!
//! The addressing engine in `sheetbridge-core` never talks to the network;
//! it consumes matrices read through a [`SheetStore`] and produces address
//! strings that are handed back to it. This crate defines that interface and
//! ships two backends:
//!
//! - [`GoogleSheetsStore`] - Sheets v4 and Drive v3 over HTTPS, authorised with
//!   a cached OAuth token that is refreshed on demand
//! - [`MemoryStore`] - an in-process store that understands the same address
//!   grammar, used by tests and offline runs
//!
//! # Architecture
//!
//! ```text
//! sheetbridge operations
//!     └── SheetStore (this crate)
//!           ├── GoogleSheetsStore ── reqwest ── sheets.googleapis.com / www.googleapis.com/drive
//!           └── MemoryStore
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbridge_store::{GoogleSheetsStore, SheetStore, StoreConfig};
//!
//! # async fn example() -> sheetbridge_store::Result<()> {
//! let store = GoogleSheetsStore::connect(StoreConfig::default()).await?;
//! let matrix = store.read_range("1AbC...", "Sheet1").await?;
//! println!("{} rows", matrix.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod google;
pub mod memory;
pub mod store;
mod wire;

pub use auth::{ClientSecret, OAuthToken, SCOPES};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use google::GoogleSheetsStore;
pub use memory::MemoryStore;
pub use store::{SheetInfo, SheetOperation, SheetStore, SpreadsheetFile, SpreadsheetInfo};
