//! # Validation Module
//!
//! Data-model checks for sale drafts, run before create and replace.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP adapter                                                 │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required text fields are not blank                                │
//! │  └── Quantities and prices are not negative                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing (lazy, at read time)                                 │
//! │  └── 20-unit line cap → InvalidQuantity                                │
//! │                                                                         │
//! │  Layer 4: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK constraints                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line cap is intentionally NOT checked here: a sale with 25 units of
//! one product can be stored, and fails only when it is priced.

use crate::error::ValidationError;
use crate::types::{NewSaleItem, SaleDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Fails with `Required` when `value` is empty or whitespace.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity value. Zero is allowed.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item.
pub fn validate_item(item: &NewSaleItem) -> ValidationResult<()> {
    validate_required("productName", &item.product_name)?;
    validate_quantity(item.quantity)?;

    if item.unit_price.is_negative() {
        return Err(ValidationError::Negative {
            field: "unitPrice".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole draft, stopping at the first problem.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use sales_core::validation::validate_draft;
/// use sales_core::SaleDraft;
///
/// let draft = SaleDraft {
///     sale_number: "S1".into(),
///     sale_date: Utc::now(),
///     customer_name: "".into(),
///     branch: "Downtown".into(),
///     items: vec![],
/// };
/// assert!(validate_draft(&draft).is_err());
/// ```
pub fn validate_draft(draft: &SaleDraft) -> ValidationResult<()> {
    validate_required("saleNumber", &draft.sale_number)?;
    validate_required("customerName", &draft.customer_name)?;

    for item in &draft.items {
        validate_item(item)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn item(name: &str, quantity: i64) -> NewSaleItem {
        NewSaleItem {
            product_name: name.to_string(),
            quantity,
            unit_price: Money::new(dec!(1.50)),
        }
    }

    fn draft(items: Vec<NewSaleItem>) -> SaleDraft {
        SaleDraft {
            sale_number: "S1".into(),
            sale_date: Utc::now(),
            customer_name: "Ada".into(),
            branch: String::new(),
            items,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("saleNumber", "S1").is_ok());
        assert!(validate_required("saleNumber", "").is_err());
        assert!(validate_required("saleNumber", "   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(20).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_over_cap_quantity_passes_validation() {
        assert!(validate_draft(&draft(vec![item("Gadget", 25)])).is_ok());
    }

    #[test]
    fn test_blank_branch_is_allowed() {
        assert!(validate_draft(&draft(vec![])).is_ok());
    }

    #[test]
    fn test_item_problems_are_reported() {
        assert_eq!(
            validate_draft(&draft(vec![item("", 1)])),
            Err(ValidationError::Required {
                field: "productName".into()
            })
        );

        let mut negative = item("Widget", 1);
        negative.unit_price = Money::new(dec!(-0.01));
        assert_eq!(
            validate_item(&negative),
            Err(ValidationError::Negative {
                field: "unitPrice".into()
            })
        );
    }
}
