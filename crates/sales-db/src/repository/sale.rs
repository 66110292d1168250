//! # Sale Repository
//!
//! SQLite implementation of the `SaleStore` port.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Writes                                       │
//! │                                                                         │
//! │  insert_sale(&sale)            one transaction                          │
//! │     └── INSERT sales                                                    │
//! │     └── INSERT sale_items (position 0..n)                               │
//! │                                                                         │
//! │  update_sale(&sale)            one transaction                          │
//! │     └── UPDATE sales ... WHERE id = ? AND version = ?                   │
//! │         (0 rows → VersionConflict, nothing written)                     │
//! │     └── DELETE sale_items WHERE sale_id = ?                             │
//! │     └── INSERT sale_items (current set, position 0..n)                  │
//! │                                                                         │
//! │  delete_sale(id)                                                        │
//! │     └── DELETE sales (items cascade)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads take the sale row and its items inside one transaction, so a
//! concurrent `update_sale` is seen either entirely or not at all.
//!
//! Ids are stored as hyphenated UUID text and money as decimal text.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use sales_core::error::StoreResult;
use sales_core::{Money, Sale, SaleItem, SaleStore};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SqliteSaleRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    sale_number: String,
    sale_date: DateTime<Utc>,
    customer_name: String,
    branch: String,
    is_cancelled: bool,
    version: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    id: String,
    product_name: String,
    quantity: i64,
    unit_price: String,
}

impl SqliteSaleRepository {
    /// Creates a new SqliteSaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSaleRepository { pool }
    }

    /// Gets a sale and its items (in position order) by ID.
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Sale>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, sale_number, sale_date, customer_name, branch, is_cancelled, version
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = fetch_items(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(Sale {
            id: parse_uuid("sales.id", &row.id)?,
            sale_number: row.sale_number,
            sale_date: row.sale_date,
            customer_name: row.customer_name,
            branch: row.branch,
            is_cancelled: row.is_cancelled,
            items,
            version: row.version,
        }))
    }

    /// Inserts a new sale and all of its items.
    pub async fn insert_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, sale_number = %sale.sale_number, items = sale.items.len(), "Inserting sale");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, sale_number, sale_date, customer_name, branch,
                is_cancelled, version, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)
            "#,
        )
        .bind(sale.id.to_string())
        .bind(&sale.sale_number)
        .bind(sale.sale_date)
        .bind(&sale.customer_name)
        .bind(&sale.branch)
        .bind(sale.is_cancelled)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, sale).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Rewrites a sale's fields and replaces its item set.
    ///
    /// ## Returns
    /// The new version. Fails with `VersionConflict` if the stored version
    /// is no longer `sale.version`, or `SaleNotFound` if the row is gone.
    pub async fn update_sale(&self, sale: &Sale) -> DbResult<i64> {
        debug!(id = %sale.id, version = sale.version, items = sale.items.len(), "Updating sale");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                sale_number = ?2,
                sale_date = ?3,
                customer_name = ?4,
                branch = ?5,
                is_cancelled = ?6,
                version = version + 1,
                updated_at = ?7
            WHERE id = ?1 AND version = ?8
            "#,
        )
        .bind(sale.id.to_string())
        .bind(&sale.sale_number)
        .bind(sale.sale_date)
        .bind(&sale.customer_name)
        .bind(&sale.branch)
        .bind(sale.is_cancelled)
        .bind(Utc::now())
        .bind(sale.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let still_there: Option<i64> = sqlx::query_scalar("SELECT 1 FROM sales WHERE id = ?1")
                .bind(sale.id.to_string())
                .fetch_optional(&mut *tx)
                .await?;

            // Dropping `tx` rolls back.
            return Err(match still_there {
                Some(_) => DbError::VersionConflict { id: sale.id },
                None => DbError::SaleNotFound { id: sale.id },
            });
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale.id.to_string())
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, sale).await?;
        tx.commit().await?;

        Ok(sale.version + 1)
    }

    /// Deletes a sale; its items go with it.
    pub async fn delete_sale(&self, id: Uuid) -> DbResult<bool> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SaleStore for SqliteSaleRepository {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>> {
        Ok(SqliteSaleRepository::get_by_id(self, id).await?)
    }

    async fn insert(&self, sale: &Sale) -> StoreResult<()> {
        Ok(self.insert_sale(sale).await?)
    }

    async fn update(&self, sale: &Sale) -> StoreResult<i64> {
        Ok(self.update_sale(sale).await?)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.delete_sale(id).await?)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Items of one sale in display order, read on the caller's connection.
async fn fetch_items(conn: &mut SqliteConnection, sale_id: Uuid) -> DbResult<Vec<SaleItem>> {
    let rows: Vec<SaleItemRow> = sqlx::query_as(
        r#"
        SELECT id, product_name, quantity, unit_price
        FROM sale_items
        WHERE sale_id = ?1
        ORDER BY position
        "#,
    )
    .bind(sale_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(SaleItem {
                id: parse_uuid("sale_items.id", &row.id)?,
                product_name: row.product_name,
                quantity: row.quantity,
                unit_price: parse_money(&row.unit_price)?,
            })
        })
        .collect()
}

async fn insert_items(tx: &mut Transaction<'_, Sqlite>, sale: &Sale) -> DbResult<()> {
    for (position, item) in sale.items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO sale_items (
                id, sale_id, position, product_name, quantity, unit_price
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(item.id.to_string())
        .bind(sale.id.to_string())
        .bind(position as i64)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.unit_price.amount().to_string())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn parse_uuid(column: &'static str, value: &str) -> DbResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| DbError::Decode {
        column,
        value: value.to_string(),
    })
}

fn parse_money(value: &str) -> DbResult<Money> {
    Decimal::from_str(value)
        .map(Money::new)
        .map_err(|_| DbError::Decode {
            column: "sale_items.unit_price",
            value: value.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
