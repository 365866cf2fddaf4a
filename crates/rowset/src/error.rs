//! Error types for rowset

use thiserror::Error;

/// Result type alias for rowset operations
pub type RowsetResult<T> = Result<T, RowsetError>;

/// Error types for data-access operations
#[derive(Debug, Error)]
pub enum RowsetError {
    /// Low-level driver I/O or protocol failure, surfaced unchanged
    #[error("Driver error: {message}")]
    Driver {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Access to a row view after its cursor advanced
    #[error("Stale row: cursor is at generation {current}, view was bound to generation {bound}")]
    StaleRow { bound: u64, current: u64 },

    /// Structurally invalid statement spec
    #[error("Malformed statement spec: {0}")]
    MalformedSpec(String),

    /// Entity name failed the injection denylist check
    #[error("Unsafe identifier: {0:?}")]
    UnsafeIdentifier(String),

    /// Row decode/conversion error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Column index or label outside the cursor's column list
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl RowsetError {
    /// Create a driver error from a message only
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
            source: None,
        }
    }

    /// Create a driver error wrapping the underlying failure
    pub fn driver_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Driver {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-spec error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSpec(message.into())
    }

    /// Create an unsafe-identifier error naming the offending identifier
    pub fn unsafe_identifier(ident: impl Into<String>) -> Self {
        Self::UnsafeIdentifier(ident.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a column-not-found error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound(column.into())
    }

    /// Check if this is a stale-row error
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleRow { .. })
    }

    /// Check if this is a driver error
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver { .. })
    }

    /// Check if this is a malformed-spec error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSpec(_))
    }

    /// Check if this is an unsafe-identifier error
    pub fn is_unsafe_identifier(&self) -> bool {
        matches!(self, Self::UnsafeIdentifier(_))
    }
}
