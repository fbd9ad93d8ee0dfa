//! # Validation Module
//!
//! Business rule checks applied before data reaches the database.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  UI shell         → parses input fields, degrades bad numbers to 0     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kasir commands   → THIS MODULE (search length, quantities, checkout)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite           → NOT NULL, CHECK and FOREIGN KEY constraints        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beras_core::validation::{validate_product_name, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_product_name("Beras Setra Ramos").is_ok());
//! assert!(validate_quantity(Decimal::new(5, 1)).is_ok());
//! assert!(validate_quantity(Decimal::ZERO).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewTransaction, Quantity};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: non-empty after trimming, at most 200 chars.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, 200)
}

/// Validates a unit label (`kg`, `liter`, `karung`): at most 20 chars.
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    validate_text("unit", unit, 20)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
///
/// Empty is fine (shows everything). Longer than 100 chars is rejected.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a UUID string.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity: > 0 and ≤ MAX_ITEM_QUANTITY.
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > Decimal::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a configured cart step: > 0 and at most 1 unit.
pub fn validate_cart_step(step: Quantity) -> ValidationResult<()> {
    if step <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "cart_step".to_string(),
        });
    }

    if step > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "cart_step".to_string(),
            min: 0,
            max: 1,
        });
    }

    Ok(())
}

// =============================================================================
// Transaction Validators
// =============================================================================

/// Checks a sale before it is handed to the recorder.
///
/// ## Rules
/// - At least one line
/// - Every line has a product id, a valid quantity and a non-negative price
/// - Amounts are not negative
/// - Cash covers the total for cash payments
///
/// The total is not re-derived from the lines: line subtotals and the
/// total are rounded separately.
pub fn validate_new_transaction(tx: &NewTransaction) -> CoreResult<()> {
    if tx.lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    for line in &tx.lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            }
            .into());
        }
        validate_quantity(line.quantity)?;
        validate_price(line.unit_price)?;
    }

    if tx.total_amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "total_amount".to_string(),
        }
        .into());
    }

    if tx.change_amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "change_amount".to_string(),
        }
        .into());
    }

    if tx.payment_method.is_cash() && tx.cash_received < tx.total_amount {
        return Err(CoreError::InsufficientCash {
            total_due: tx.total_amount,
            tendered: tx.cash_received,
        });
    }

    if let Some(cashier_id) = &tx.cashier_id {
        validate_uuid("cashier_id", cashier_id)?;
    }

    Ok(())
}
