//! # Sale Store Port
//!
//! The persistence contract the use-cases are written against.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleService (sales-core)                                               │
//! │       │                                                                 │
//! │       │  store.get_by_id(id) / insert(&sale) / update(&sale)            │
//! │       ▼                                                                 │
//! │  SaleStore (THIS TRAIT)                                                 │
//! │  ├── InMemorySaleStore      tests, demos                                │
//! │  └── SqliteSaleRepository   sales-db                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Update Contract
//! `update` persists the whole aggregate explicitly: every scalar field is
//! rewritten and the stored item set is replaced by `sale.items` (removed
//! items are deleted). The write succeeds only if the stored version still
//! equals `sale.version`; otherwise it fails with `StoreError::Conflict`.
//! A sale deleted in the meantime fails with `StoreError::NotFound`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::types::Sale;

/// Load/save port for the Sale aggregate.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Loads a sale and its items in display order.
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>>;

    /// Inserts a new sale and its items.
    async fn insert(&self, sale: &Sale) -> StoreResult<()>;

    /// Rewrites a loaded sale. Returns the new version.
    async fn update(&self, sale: &Sale) -> StoreResult<i64>;

    /// Deletes a sale (items cascade). Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> bool {
        true
    }
}

#[async_trait]
impl<S: SaleStore + ?Sized> SaleStore for Arc<S> {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>> {
        (**self).get_by_id(id).await
    }

    async fn insert(&self, sale: &Sale) -> StoreResult<()> {
        (**self).insert(sale).await
    }

    async fn update(&self, sale: &Sale) -> StoreResult<i64> {
        (**self).update(sale).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        (**self).delete(id).await
    }

    async fn health_check(&self) -> bool {
        (**self).health_check().await
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// `HashMap`-backed store. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySaleStore {
    sales: Arc<RwLock<HashMap<Uuid, Sale>>>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sales.
    pub async fn len(&self) -> usize {
        self.sales.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sales.read().await.is_empty()
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>> {
        Ok(self.sales.read().await.get(&id).cloned())
    }

    async fn insert(&self, sale: &Sale) -> StoreResult<()> {
        let mut sales = self.sales.write().await;
        if sales.contains_key(&sale.id) {
            return Err(StoreError::Backend(format!("sale {} already exists", sale.id)));
        }

        let mut stored = sale.clone();
        stored.version = 0;
        sales.insert(sale.id, stored);
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> StoreResult<i64> {
        let mut sales = self.sales.write().await;
        let stored = sales
            .get_mut(&sale.id)
            .ok_or(StoreError::NotFound { sale_id: sale.id })?;
        if stored.version != sale.version {
            return Err(StoreError::Conflict { sale_id: sale.id });
        }

        *stored = sale.clone();
        stored.version = sale.version + 1;
        Ok(stored.version)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.sales.write().await.remove(&id).is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
