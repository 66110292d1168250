//! # Pricing Module
//!
//! Volume-discount tiers for a single sale line.
//!
//! ## Discount Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity      discount                                                 │
//! │  ───────────   ─────────────────────────────                            │
//! │  > 20          InvalidQuantity (line cap)                               │
//! │  10 ..= 20     20% of unit_price × quantity                             │
//! │  4  ..= 9      10% of unit_price × quantity                             │
//! │  < 4           none                                                     │
//! │                                                                         │
//! │  total = unit_price × quantity − discount                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tiers are checked top to bottom, so they never overlap. Everything here
//! is a pure function of `(quantity, unit_price)`; callers re-evaluate on
//! every read instead of caching.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Smallest quantity in the 20% tier.
pub const BULK_TIER_MIN_QUANTITY: i64 = 10;

/// Smallest quantity in the 10% tier.
pub const VOLUME_TIER_MIN_QUANTITY: i64 = 4;

/// Discount and total for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePricing {
    pub discount: Money,
    pub total: Money,
}

/// Returns the discount rate for `quantity` (0.20, 0.10 or 0).
///
/// ## Errors
/// `CoreError::InvalidQuantity` when `quantity` exceeds the 20-unit cap.
pub fn discount_rate(quantity: i64) -> CoreResult<Decimal> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::InvalidQuantity {
            quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    let rate = if quantity >= BULK_TIER_MIN_QUANTITY {
        Decimal::new(20, 2)
    } else if quantity >= VOLUME_TIER_MIN_QUANTITY {
        Decimal::new(10, 2)
    } else {
        Decimal::ZERO
    };

    Ok(rate)
}

/// Discount for `quantity` units at `unit_price`.
pub fn discount(quantity: i64, unit_price: Money) -> CoreResult<Money> {
    Ok(price_line(quantity, unit_price)?.discount)
}

/// Discount and line total for `quantity` units at `unit_price`.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use sales_core::money::Money;
/// use sales_core::pricing::price_line;
///
/// let line = price_line(5, Money::new(Decimal::new(1000, 2))).unwrap();
/// assert_eq!(line.discount.amount(), Decimal::new(500, 2)); // 10% tier
/// assert_eq!(line.total.amount(), Decimal::new(4500, 2));
/// ```
///
/// ## Errors
/// - `InvalidQuantity` over the cap, checked before any arithmetic
/// - `AmountOverflow` when `unit_price × quantity` leaves `Decimal` range
pub fn price_line(quantity: i64, unit_price: Money) -> CoreResult<LinePricing> {
    let rate = discount_rate(quantity)?;
    let gross = unit_price.multiply_quantity(quantity)?;
    let discount = gross.percentage(rate)?;

    Ok(LinePricing {
        discount,
        total: gross.checked_sub(discount)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
