//! Error types for sheetbridge-core

use thiserror::Error;

use crate::cell::TypeTag;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the addressing and filtering engine.
///
/// Every variant describes bad caller input; failures of the remote store
/// never pass through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No header cell matches the requested column name
    #[error("no column found with name '{0}'")]
    ColumnNotFound(String),

    /// The comparand's type disagrees with the column's inferred type
    #[error("incorrect value type for column '{column}': expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: TypeTag,
        found: TypeTag,
    },

    /// The operator is not valid for the column's inferred type
    #[error("unsupported operator '{operator}' for {type_tag} column")]
    UnsupportedOperator { operator: String, type_tag: TypeTag },
}
