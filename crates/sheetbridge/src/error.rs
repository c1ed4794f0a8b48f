//! Error types for sheetbridge operations.

use std::fmt;

use sheetbridge_store::StoreError;
use thiserror::Error;

/// Coarse classification of a [`ServiceError`].
///
/// The boundary layer maps a kind to an outcome without inspecting the
/// error text: everything but [`ErrorKind::Upstream`] is a caller fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing or malformed
    Validation,
    /// The named column does not exist
    NotFound,
    /// The comparand's type disagrees with the column's inferred type
    TypeMismatch,
    /// The operator cannot be applied to the column's inferred type
    UnsupportedOperator,
    /// The remote store call failed
    Upstream,
}

impl ErrorKind {
    /// HTTP status code for this kind
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::TypeMismatch | ErrorKind::UnsupportedOperator => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Upstream => 502,
        }
    }

    /// Check if the caller, rather than the store, is at fault
    pub fn is_caller_fault(self) -> bool {
        self != ErrorKind::Upstream
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::UnsupportedOperator => "unsupported_operator",
            ErrorKind::Upstream => "upstream",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`SheetService`](crate::SheetService) operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed request input
    #[error("{0}")]
    Validation(String),

    /// Addressing or filter failure
    #[error(transparent)]
    Core(#[from] sheetbridge_core::Error),

    /// Remote store failure
    #[error("store request failed: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn required(field: &str) -> Self {
        ServiceError::Validation(format!("{field} field is required"))
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Core(e) => match e {
                sheetbridge_core::Error::ColumnNotFound(_) => ErrorKind::NotFound,
                sheetbridge_core::Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
                sheetbridge_core::Error::UnsupportedOperator { .. } => {
                    ErrorKind::UnsupportedOperator
                }
            },
            ServiceError::Store(_) => ErrorKind::Upstream,
        }
    }

    /// Shorthand for `self.kind().status_code()`
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Result type for sheetbridge operations
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbridge_core::TypeTag;

    #[test]
    fn test_kind_and_status() {
        let err = ServiceError::required("spreadsheetID");
        assert_eq!(err.to_string(), "spreadsheetID field is required");
        assert_eq!(err.status_code(), 400);

        let err: ServiceError = sheetbridge_core::Error::ColumnNotFound("Phone".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);

        let err: ServiceError = sheetbridge_core::Error::TypeMismatch {
            column: "Score".into(),
            expected: TypeTag::Float,
            found: TypeTag::Text,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.kind().is_caller_fault());

        let err: ServiceError = StoreError::Auth("expired".into()).into();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.status_code(), 502);
        assert!(!err.kind().is_caller_fault());
    }
}
