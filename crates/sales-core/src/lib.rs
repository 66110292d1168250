//! # sales-core: Pure Business Logic for the Sales Ledger
//!
//! Pricing rules, the Sale aggregate and the five sale use-cases. No I/O
//! happens in this crate; persistence is reached through the [`SaleStore`]
//! trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sales Ledger Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 sales-api (axum, HTTP/JSON)                     │   │
//! │  │   POST /api/sales, GET/PUT /api/sales/{id}, .../cancel          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sales-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  money   │  │ pricing  │  │  types   │  │   service    │   │   │
//! │  │   │  Money   │  │  tiers   │  │  Sale    │  │  use-cases   │   │   │
//! │  │   └──────────┘  └──────────┘  │ SaleItem │  │  + events    │   │   │
//! │  │                               └──────────┘  └──────┬───────┘   │   │
//! │  │                                          SaleStore (port)      │   │
//! │  └────────────────────────────────────────────────────┬────────────┘   │
//! │                                                       │                 │
//! │  ┌────────────────────────────────────────────────────▼────────────┐   │
//! │  │                 sales-db (SQLite repository)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type over exact decimals (no floating point!)
//! - [`pricing`] - Volume-discount tiers and line totals
//! - [`types`] - Sale, SaleItem, drafts and read projections
//! - [`validation`] - Draft checks
//! - [`events`] - Sale notifications and emitters
//! - [`store`] - Persistence port and in-memory store
//! - [`service`] - Create / get / replace / cancel sale / cancel item
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use sales_core::{Money, NewSaleItem, SaleDraft};
//! use sales_core::store::InMemorySaleStore;
//! use sales_core::service::SaleService;
//!
//! # tokio_test_block(async {
//! let service = SaleService::new(InMemorySaleStore::new());
//! let sale = service
//!     .create(SaleDraft {
//!         sale_number: "S1".into(),
//!         sale_date: chrono::Utc::now(),
//!         customer_name: "Ada".into(),
//!         branch: "Downtown".into(),
//!         items: vec![NewSaleItem {
//!             product_name: "Widget".into(),
//!             quantity: 5,
//!             unit_price: Money::new(Decimal::new(1000, 2)),
//!         }],
//!     })
//!     .await
//!     .unwrap();
//!
//! let view = service.get(sale.id).await.unwrap();
//! assert_eq!(view.total_amount.amount(), Decimal::new(4500, 2));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod money;
pub mod pricing;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, SaleError, StoreError, ValidationError};
pub use events::{SaleEvent, SaleEventEmitter};
pub use money::Money;
pub use service::SaleService;
pub use store::SaleStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product on one line.
///
/// ## Business Reason
/// Lines above this are stored but cannot be priced: reading their discount
/// or total fails with `CoreError::InvalidQuantity`.
pub const MAX_LINE_QUANTITY: i64 = 20;
