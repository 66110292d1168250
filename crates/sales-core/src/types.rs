//! # Domain Types
//!
//! The Sale aggregate, its line items, and the request/response shapes the
//! use-cases accept and return.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  owns 0..n  ┌─────────────────┐                   │
//! │  │      Sale       │────────────►│    SaleItem     │                   │
//! │  │  ─────────────  │  (ordered)  │  ─────────────  │                   │
//! │  │  id (UUID)      │             │  id (UUID)      │                   │
//! │  │  sale_number    │             │  product_name   │                   │
//! │  │  sale_date      │             │  quantity       │                   │
//! │  │  customer_name  │             │  unit_price     │                   │
//! │  │  branch         │             │  discount()  ◄── derived            │
//! │  │  is_cancelled   │             │  total()     ◄── derived            │
//! │  │  total_amount() │             └─────────────────┘                   │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Inbound:  SaleDraft { .., items: [NewSaleItem] }                      │
//! │  Outbound: SaleView  { .., items: [SaleItemView], total_amount }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sale State Machine
//! ```text
//!   create ──► Active ──cancel──► Cancelled   (terminal)
//!               │  ▲                 │  ▲
//!               └──┘                 └──┘
//!        replace / cancel item   replace / cancel item
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, SaleError, SaleResult};
use crate::money::Money;
use crate::pricing::{self, LinePricing};

// =============================================================================
// Sale Item
// =============================================================================

/// One purchased line of a sale.
///
/// Discount and total are never stored; they are recomputed from
/// `quantity` and `unit_price` on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    #[ts(as = "String")]
    pub id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    #[ts(type = "string")]
    pub unit_price: Money,
}

impl SaleItem {
    /// Builds a fresh line with a newly generated id.
    pub fn new(product_name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        SaleItem {
            id: Uuid::new_v4(),
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Volume discount for this line.
    pub fn discount(&self) -> CoreResult<Money> {
        pricing::discount(self.quantity, self.unit_price)
    }

    /// `unit_price × quantity − discount`.
    pub fn total(&self) -> CoreResult<Money> {
        Ok(self.pricing()?.total)
    }

    /// Discount and total in one evaluation.
    pub fn pricing(&self) -> CoreResult<LinePricing> {
        pricing::price_line(self.quantity, self.unit_price)
    }

    /// Read projection of this line.
    pub fn view(&self) -> CoreResult<SaleItemView> {
        let LinePricing { discount, total } = self.pricing()?;

        Ok(SaleItemView {
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount,
            total,
        })
    }
}

impl From<NewSaleItem> for SaleItem {
    fn from(item: NewSaleItem) -> Self {
        SaleItem::new(item.product_name, item.quantity, item.unit_price)
    }
}

// =============================================================================
// Sale State
// =============================================================================

/// Lifecycle state derived from the cancellation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleState {
    Active,
    Cancelled,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction and the lines it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    #[ts(as = "String")]
    pub id: Uuid,
    pub sale_number: String,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub branch: String,
    pub is_cancelled: bool,
    pub items: Vec<SaleItem>,
    /// Store version for optimistic concurrency. Not part of the API.
    #[serde(skip)]
    #[ts(skip)]
    pub version: i64,
}

impl Sale {
    /// Creates an active sale from a draft. Every line gets a new id.
    pub fn create(draft: SaleDraft) -> Self {
        Sale {
            id: Uuid::new_v4(),
            sale_number: draft.sale_number,
            sale_date: draft.sale_date,
            customer_name: draft.customer_name,
            branch: draft.branch,
            is_cancelled: false,
            items: draft.items.into_iter().map(SaleItem::from).collect(),
            version: 0,
        }
    }

    /// Overwrites every scalar field and swaps in a fresh item collection.
    ///
    /// The cancellation flag is left untouched, and a cancelled sale can
    /// still be replaced.
    pub fn replace(&mut self, draft: SaleDraft) {
        self.sale_number = draft.sale_number;
        self.sale_date = draft.sale_date;
        self.customer_name = draft.customer_name;
        self.branch = draft.branch;
        self.items = draft.items.into_iter().map(SaleItem::from).collect();
    }

    /// Marks the sale cancelled. Cancelling twice is an error.
    pub fn cancel(&mut self) -> SaleResult<()> {
        match self.state() {
            SaleState::Cancelled => Err(SaleError::AlreadyCancelled { sale_id: self.id }),
            SaleState::Active => {
                self.is_cancelled = true;
                Ok(())
            }
        }
    }

    /// Removes the first line whose product name matches exactly.
    ///
    /// Duplicates are left in place; call again to remove the next one.
    pub fn remove_item(&mut self, product_name: &str) -> SaleResult<SaleItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_name == product_name)
            .ok_or_else(|| SaleError::ItemNotFound {
                sale_id: self.id,
                product_name: product_name.to_string(),
            })?;

        Ok(self.items.remove(index))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SaleState {
        if self.is_cancelled {
            SaleState::Cancelled
        } else {
            SaleState::Active
        }
    }

    /// Sum of every line total.
    pub fn total_amount(&self) -> CoreResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |sum, item| sum.checked_add(item.total()?))
    }

    /// Read projection of the whole sale.
    ///
    /// Fails with `InvalidQuantity` if any line is over the cap.
    pub fn view(&self) -> CoreResult<SaleView> {
        let items = self
            .items
            .iter()
            .map(SaleItem::view)
            .collect::<CoreResult<Vec<_>>>()?;
        let total_amount = Money::try_sum(items.iter().map(|item| item.total))?;

        Ok(SaleView {
            id: self.id,
            sale_number: self.sale_number.clone(),
            sale_date: self.sale_date,
            customer_name: self.customer_name.clone(),
            branch: self.branch.clone(),
            is_cancelled: self.is_cancelled,
            items,
            total_amount,
        })
    }
}

// =============================================================================
// Inbound Shapes
// =============================================================================

/// Line supplied by a caller on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSaleItem {
    pub product_name: String,
    pub quantity: i64,
    #[ts(type = "string")]
    pub unit_price: Money,
}

/// Full set of caller-supplied sale fields (create and replace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleDraft {
    pub sale_number: String,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub items: Vec<NewSaleItem>,
}

// =============================================================================
// Outbound Shapes
// =============================================================================

/// Priced line as returned by Get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItemView {
    pub product_name: String,
    pub quantity: i64,
    #[ts(type = "string")]
    pub unit_price: Money,
    #[ts(type = "string")]
    pub discount: Money,
    #[ts(type = "string")]
    pub total: Money,
}

/// Sale as returned by Get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleView {
    #[ts(as = "String")]
    pub id: Uuid,
    pub sale_number: String,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub branch: String,
    pub is_cancelled: bool,
    pub items: Vec<SaleItemView>,
    #[ts(type = "string")]
    pub total_amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
