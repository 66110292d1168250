//! # Error Types
//!
//! Domain-specific error types for sales-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sales-core errors (this file)                                         │
//! │  ├── ValidationError  - Draft fails a data-model constraint            │
//! │  ├── CoreError        - Pricing rule violations                        │
//! │  ├── StoreError       - What a SaleStore implementation reports        │
//! │  └── SaleError        - Use-case outcome (what the transport maps)     │
//! │                                                                         │
//! │  sales-db errors (separate crate)                                      │
//! │  └── DbError          - SQLite failures, converted into StoreError     │
//! │                                                                         │
//! │  sales-api errors (in app)                                             │
//! │  └── ApiError         - HTTP status + JSON body                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                   │
//! │        DbError → StoreError ────────┴→ SaleError → ApiError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the pricing and validation code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A line sells more units than the per-line cap.
    ///
    /// ## When This Occurs
    /// Raised lazily: creating or replacing a sale with 25 units succeeds,
    /// reading that line's discount or total fails.
    /// ```text
    /// Get sale
    ///      │
    ///      ▼
    /// item.discount()  qty=25
    ///      │
    ///      ▼
    /// InvalidQuantity { quantity: 25, max: 20 }
    /// ```
    #[error("Cannot sell more than {max} units of one product (got {quantity})")]
    InvalidQuantity { quantity: i64, max: i64 },

    /// A price, line amount or sale total left the range `Decimal` can hold.
    #[error("Amount out of range during {operation}")]
    AmountOverflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for sale drafts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by a [`SaleStore`](crate::store::SaleStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The stored version moved on since the sale was loaded.
    #[error("Sale {sale_id} was modified concurrently")]
    Conflict { sale_id: Uuid },

    /// The sale was removed since it was loaded.
    #[error("Sale {sale_id} no longer exists")]
    NotFound { sale_id: Uuid },

    /// Backend failure (connection, query, decoding).
    #[error("Storage failure: {0}")]
    Backend(String),
}

// =============================================================================
// Sale Error
// =============================================================================

/// Outcome of a failed sale use-case.
///
/// `NotFound` and `ItemNotFound` are the same *kind* of failure: the
/// transport reports both as not found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("Sale not found: {sale_id}")]
    NotFound { sale_id: Uuid },

    #[error("Sale {sale_id} has no item named '{product_name}'")]
    ItemNotFound { sale_id: Uuid, product_name: String },

    #[error("Sale {sale_id} is already cancelled")]
    AlreadyCancelled { sale_id: Uuid },

    #[error("Sale {sale_id} was modified concurrently, reload and retry")]
    Conflict { sale_id: Uuid },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(StoreError),
}

impl SaleError {
    /// True for both "no such sale" and "no such item".
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaleError::NotFound { .. } | SaleError::ItemNotFound { .. })
    }
}

impl From<StoreError> for SaleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { sale_id } => SaleError::Conflict { sale_id },
            StoreError::NotFound { sale_id } => SaleError::NotFound { sale_id },
            other => SaleError::Store(other),
        }
    }
}

impl From<ValidationError> for SaleError {
    fn from(err: ValidationError) -> Self {
        SaleError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a use-case.
pub type SaleResult<T> = Result<T, SaleError>;

/// Result of a store call.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
