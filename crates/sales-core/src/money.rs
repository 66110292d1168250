//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Volume discounts make it worse:                                        │
//! │    $0.99 × 5 × 10% = $0.495  → cents would have to round               │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    0.99 × 5 × 0.10 = 0.495 exactly, sums stay exact                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use sales_core::money::Money;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//! let line = price.multiply_quantity(3).unwrap(); // 32.97
//! assert_eq!(line.amount(), Decimal::new(3297, 2));
//! ```
//!
//! ## Overflow
//! `Decimal` tops out near 7.9 × 10²⁸. Every operation here is checked and
//! reports `CoreError::AmountOverflow` instead of panicking, so a huge
//! stored price fails one read rather than the whole request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the sale's (single) currency.
///
/// ## Design Decisions
/// - **Decimal (not i64 cents)**: discounts are percentages of
///   `price × quantity` and must not round
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Transparent serde**: serializes exactly like the inner `Decimal`
///   (a decimal string), accepts JSON numbers or strings on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sales_core::money::Money;
    ///
    /// let unit_price = Money::new(Decimal::new(299, 2)); // 2.99
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.amount(), Decimal::new(897, 2));
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Self> {
        self.0
            .checked_mul(Decimal::from(qty))
            .map(Money)
            .ok_or(CoreError::AmountOverflow { operation: "multiply" })
    }

    /// Returns `rate` of this amount (0.10 = 10%), without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sales_core::money::Money;
    ///
    /// let gross = Money::new(Decimal::new(495, 2)); // 4.95
    /// let ten_percent = gross.percentage(Decimal::new(10, 2)).unwrap();
    /// assert_eq!(ten_percent.amount(), Decimal::new(495, 3)); // 0.495
    /// ```
    pub fn percentage(&self, rate: Decimal) -> CoreResult<Self> {
        self.0
            .checked_mul(rate)
            .map(Money)
            .ok_or(CoreError::AmountOverflow { operation: "multiply" })
    }

    pub fn checked_add(self, other: Self) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow { operation: "add" })
    }

    pub fn checked_sub(self, other: Self) -> CoreResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow { operation: "subtract" })
    }

    /// Adds up `amounts`, failing on the first overflow.
    pub fn try_sum<I>(amounts: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to two places.
///
/// ## Note
/// For logs only. Calculations always use the unrounded amount.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
