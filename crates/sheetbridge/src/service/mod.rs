//! The operation layer: one method per API route.
//!
//! Every row/column operation reads the sheet first, trims it with
//! [`locate`], and derives store addresses from the occupied column span.
//! Requests are validated before any store call is made.

mod create;
mod delete;
mod read;
mod update;

use sheetbridge_core::{locate, ColumnSpan, Located};
use sheetbridge_store::SheetStore;

use crate::error::{Result, ServiceError};

/// Operations over a [`SheetStore`], constructed once and shared by callers.
#[derive(Debug)]
pub struct SheetService<S> {
    store: S,
}

impl<S: SheetStore> SheetService<S> {
    /// Create a service over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read a sheet and trim it to its occupied region
    async fn located(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<Located> {
        let raw = self.store.read_range(spreadsheet_id, sheet_name).await?;
        Ok(locate(&raw))
    }

    /// Occupied column span of a sheet; an empty sheet has nothing to address
    async fn occupied_span(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<ColumnSpan> {
        let located = self.located(spreadsheet_id, sheet_name).await?;
        located
            .range
            .ok_or_else(|| ServiceError::Validation("sheet has no data".into()))
    }
}
