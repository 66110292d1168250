//! # Sale Service
//!
//! The five sale use-cases, each a read-modify-write against a [`SaleStore`].
//!
//! ## Use-Case Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(draft)                                                          │
//! │    validate ──► Sale::create ──► store.insert ──► emit SaleCreated      │
//! │                                                                         │
//! │  get(id)                                                                │
//! │    store.get_by_id ──► sale.view()  (prices every line)                 │
//! │                                                                         │
//! │  replace(id, draft)                                                     │
//! │    validate ──► load ──► sale.replace ──► store.update ──► SaleModified │
//! │                                                                         │
//! │  cancel_sale(id)                                                        │
//! │    load ──► sale.cancel ──► store.update ──► SaleCancelled              │
//! │                                                                         │
//! │  cancel_item(id, product)                                               │
//! │    load ──► sale.remove_item ──► store.update ──► ItemCancelled         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events go out only after the store call succeeds. Nothing here retries.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SaleError, SaleResult};
use crate::events::{SaleEvent, SaleEventEmitter, TracingEmitter};
use crate::store::SaleStore;
use crate::types::{Sale, SaleDraft, SaleView};
use crate::validation::validate_draft;

/// Orchestrates the Sale aggregate against a store.
pub struct SaleService<S> {
    store: S,
    emitter: Arc<dyn SaleEventEmitter>,
}

impl<S: SaleStore> SaleService<S> {
    /// Creates a service that logs events through `tracing`.
    pub fn new(store: S) -> Self {
        Self::with_emitter(store, Arc::new(TracingEmitter))
    }

    /// Creates a service with a custom event emitter.
    pub fn with_emitter(store: S, emitter: Arc<dyn SaleEventEmitter>) -> Self {
        SaleService { store, emitter }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a sale from `draft` and returns it with its new id.
    pub async fn create(&self, draft: SaleDraft) -> SaleResult<Sale> {
        validate_draft(&draft)?;

        let sale = Sale::create(draft);
        debug!(sale_id = %sale.id, items = sale.items.len(), "Creating sale");

        self.store.insert(&sale).await?;

        info!(sale_id = %sale.id, sale_number = %sale.sale_number, "Sale created");
        self.emitter.emit(&SaleEvent::SaleCreated { sale_id: sale.id });

        Ok(sale)
    }

    /// Priced projection of a sale.
    pub async fn get(&self, id: Uuid) -> SaleResult<SaleView> {
        let sale = self.load(id).await?;
        Ok(sale.view()?)
    }

    /// Overwrites every field and the full item set of an existing sale.
    pub async fn replace(&self, id: Uuid, draft: SaleDraft) -> SaleResult<()> {
        validate_draft(&draft)?;

        let mut sale = self.load(id).await?;
        sale.replace(draft);
        self.store.update(&sale).await?;

        info!(sale_id = %id, items = sale.items.len(), "Sale replaced");
        self.emitter.emit(&SaleEvent::SaleModified { sale_id: id });

        Ok(())
    }

    /// Cancels a sale. A second call fails with `AlreadyCancelled`.
    pub async fn cancel_sale(&self, id: Uuid) -> SaleResult<()> {
        let mut sale = self.load(id).await?;
        sale.cancel()?;
        self.store.update(&sale).await?;

        info!(sale_id = %id, "Sale cancelled");
        self.emitter.emit(&SaleEvent::SaleCancelled { sale_id: id });

        Ok(())
    }

    /// Removes the first item named exactly `product_name`.
    pub async fn cancel_item(&self, id: Uuid, product_name: &str) -> SaleResult<()> {
        let mut sale = self.load(id).await?;
        let removed = sale.remove_item(product_name)?;
        self.store.update(&sale).await?;

        info!(sale_id = %id, item_id = %removed.id, product = %product_name, "Sale item cancelled");
        self.emitter.emit(&SaleEvent::ItemCancelled {
            sale_id: id,
            product_name: product_name.to_string(),
        });

        Ok(())
    }

    async fn load(&self, id: Uuid) -> SaleResult<Sale> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(SaleError::NotFound { sale_id: id })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
