//! # sales-db: Database Layer for the Sales Ledger
//!
//! SQLite persistence for sales, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sales Ledger Data Flow                           │
//! │                                                                         │
//! │  HTTP handler (PUT /api/sales/{id})                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleService (sales-core) ──► SaleStore port                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     sales-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ SqliteSaleRepo     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ (repository/sale)  │  │ (embedded) │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (SALES_DATABASE_PATH)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sales_core::SaleService;
//! use sales_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sales.db")).await?;
//! let service = SaleService::new(db.sales());
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::sale::SqliteSaleRepository;
