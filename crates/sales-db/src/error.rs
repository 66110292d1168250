//! # Persistence Errors
//!
//! Everything that can go wrong between the sale repository and SQLite.
//!
//! ```text
//! sqlx::Error / MigrateError
//!        │  From (constraint text is inspected)
//!        ▼
//! DbError ──────────────► StoreError (sales-core port)
//!   VersionConflict  ──►    Conflict
//!   SaleNotFound     ──►    NotFound
//!   everything else  ──►    Backend(message)
//! ```

use sales_core::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Failure of a ledger database call.
#[derive(Debug, Error)]
pub enum DbError {
    /// The row's `version` moved on since the sale was read. The update
    /// touched nothing.
    #[error("Sale {id} was modified concurrently")]
    VersionConflict { id: Uuid },

    /// The row was deleted since the sale was read.
    #[error("Sale {id} no longer exists")]
    SaleNotFound { id: Uuid },

    /// A row with the same key already exists, e.g. inserting a sale twice.
    #[error("Duplicate {field}")]
    UniqueViolation { field: String },

    /// Item rows must point at an existing sale.
    #[error("Dangling reference: {message}")]
    ForeignKeyViolation { message: String },

    /// The database file could not be opened, or the pool is closed.
    #[error("Cannot open sales database: {0}")]
    ConnectionFailed(String),

    /// Every connection stayed busy past the acquire timeout.
    #[error("No free database connection")]
    PoolExhausted,

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement for a reason other than a constraint.
    #[error("SQL error: {0}")]
    QueryFailed(String),

    /// A stored value could not be decoded (bad UUID or decimal text).
    #[error("Corrupt {column} value '{value}'")]
    Decode { column: &'static str, value: String },

    /// Driver-level failure (I/O, protocol, row decoding).
    #[error("Database driver error: {0}")]
    Driver(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => classify_constraint(db_err.message()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Driver(other.to_string()),
        }
    }
}

/// SQLite reports constraint failures only as text, e.g.
/// `UNIQUE constraint failed: sales.id`.
fn classify_constraint(message: &str) -> DbError {
    if let Some(field) = message.strip_prefix("UNIQUE constraint failed: ") {
        DbError::UniqueViolation {
            field: field.to_string(),
        }
    } else if message.starts_with("FOREIGN KEY constraint failed") {
        DbError::ForeignKeyViolation {
            message: message.to_string(),
        }
    } else {
        DbError::QueryFailed(message.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::VersionConflict { id } => StoreError::Conflict { sale_id: id },
            DbError::SaleNotFound { id } => StoreError::NotFound { sale_id: id },
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages_are_classified() {
        assert!(matches!(
            classify_constraint("UNIQUE constraint failed: sales.id"),
            DbError::UniqueViolation { field } if field == "sales.id"
        ));
        assert!(matches!(
            classify_constraint("FOREIGN KEY constraint failed"),
            DbError::ForeignKeyViolation { .. }
        ));
        assert!(matches!(
            classify_constraint("CHECK constraint failed: quantity >= 0"),
            DbError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_conflict_crosses_the_port() {
        let id = Uuid::new_v4();
        let err: StoreError = DbError::VersionConflict { id }.into();
        assert_eq!(err, StoreError::Conflict { sale_id: id });
    }

    #[test]
    fn test_vanished_row_crosses_as_not_found() {
        let id = Uuid::new_v4();
        let err: StoreError = DbError::SaleNotFound { id }.into();
        assert_eq!(err, StoreError::NotFound { sale_id: id });
    }

    #[test]
    fn test_other_errors_become_backend() {
        let err: StoreError = DbError::PoolExhausted.into();
        assert_eq!(err, StoreError::Backend("No free database connection".to_string()));
    }
}
