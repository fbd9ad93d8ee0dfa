//! # Payment Calculator
//!
//! Turns a cart total and the cash on the counter into change, and decides
//! whether checkout is allowed.
//!
//! ## Checkout Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   method ──┬── Transfer / QRIS ─────────────────────► can checkout      │
//! │            │                                                            │
//! │            └── Cash ──► tendered >= total_due ? ──┬─► can checkout      │
//! │                                                   └─► blocked           │
//! │                                                                         │
//! │   change = tendered − total_due        (signed, gates checkout)         │
//! │   display_change = max(0, change)      (what the screen shows)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error. Tendered text that is not a number counts
//! as zero, which keeps a cash checkout blocked.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::PaymentMethod;

/// Quick-amount buttons on the cash panel, in rupiah.
pub const QUICK_AMOUNTS: [Money; 5] = [
    Money::from_rupiah(5_000),
    Money::from_rupiah(10_000),
    Money::from_rupiah(20_000),
    Money::from_rupiah(50_000),
    Money::from_rupiah(100_000),
];

/// Ceiling for typed tendered cash.
pub const MAX_TENDERED: Money = Money::from_rupiah(1_000_000_000_000);

// =============================================================================
// Pure Functions
// =============================================================================

/// Total due for a cart, rounded once to whole rupiah.
pub fn quote(cart: &Cart) -> Money {
    Money::from_decimal_rounded(cart.totals().total_price)
}

/// Adds a quick-amount press to the tendered cash. Unbounded, saturating
/// at the i64 maximum.
#[inline]
pub fn apply_quick_amount(current_tendered: Money, increment: Money) -> Money {
    current_tendered.saturating_add(increment)
}

/// The "Pas" (exact amount) button.
#[inline]
pub fn set_exact(total_due: Money) -> Money {
    total_due
}

/// The "Clear" button.
#[inline]
pub fn clear() -> Money {
    Money::zero()
}

/// Result of comparing tendered cash to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeEvaluation {
    /// tendered − total_due. Negative while cash is short.
    pub change: Money,
    pub sufficient: bool,
    /// Change clamped at zero for display.
    pub display_change: Money,
}

pub fn evaluate(total_due: Money, tendered: Money) -> ChangeEvaluation {
    let change = tendered - total_due;
    ChangeEvaluation {
        change,
        sufficient: tendered >= total_due,
        display_change: change.clamp_non_negative(),
    }
}

/// Only cash is gated on the tendered amount.
pub fn can_checkout(method: PaymentMethod, total_due: Money, tendered: Money) -> bool {
    !method.is_cash() || tendered >= total_due
}

/// Reads the tendered-cash text field.
///
/// Empty or non-numeric text is 0, fractions are truncated and negatives
/// clamp to 0. Anything above [`MAX_TENDERED`], including numbers too long
/// to parse, becomes [`MAX_TENDERED`].
pub fn parse_tendered(text: &str) -> Money {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Money::zero();
    }
    match trimmed.parse::<Decimal>() {
        Ok(amount) if amount > Decimal::ZERO => amount
            .trunc()
            .to_i64()
            .map(Money::from_rupiah)
            .map_or(MAX_TENDERED, |m| m.min(MAX_TENDERED)),
        Ok(_) => Money::zero(),
        Err(_) if is_all_digits(trimmed) => MAX_TENDERED,
        Err(_) => Money::zero(),
    }
}

fn is_all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Tender
// =============================================================================

/// Payment panel state for the active sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tender {
    pub method: PaymentMethod,
    /// Cash on the counter. Ignored for non-cash methods.
    pub tendered: Money,
    pub total_due: Money,
}

/// What the recorder stores about the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub method: PaymentMethod,
    pub total_due: Money,
    pub cash_received: Money,
    pub change: Money,
}

impl Tender {
    /// Cash payment with nothing tendered yet.
    pub fn new(total_due: Money) -> Self {
        Tender {
            method: PaymentMethod::Cash,
            tendered: Money::zero(),
            total_due,
        }
    }

    /// Re-quotes after the cart changed. Keeps method and tendered cash.
    pub fn with_total(self, total_due: Money) -> Self {
        Tender { total_due, ..self }
    }

    pub fn with_method(self, method: PaymentMethod) -> Self {
        Tender { method, ..self }
    }

    pub fn quick_amount(self, increment: Money) -> Self {
        Tender {
            tendered: apply_quick_amount(self.tendered, increment),
            ..self
        }
    }

    pub fn exact(self) -> Self {
        Tender {
            tendered: set_exact(self.total_due),
            ..self
        }
    }

    pub fn cleared(self) -> Self {
        Tender {
            tendered: clear(),
            ..self
        }
    }

    /// Replaces the tendered amount with whatever the cashier typed.
    pub fn with_entered_text(self, text: &str) -> Self {
        Tender {
            tendered: parse_tendered(text),
            ..self
        }
    }

    pub fn evaluation(&self) -> ChangeEvaluation {
        evaluate(self.total_due, self.tendered)
    }

    pub fn can_checkout(&self) -> bool {
        can_checkout(self.method, self.total_due, self.tendered)
    }

    /// Payment figures for the transaction record.
    ///
    /// Non-cash payments are recorded as received in full with no change.
    pub fn settlement(&self) -> Settlement {
        if self.method.is_cash() {
            Settlement {
                method: self.method,
                total_due: self.total_due,
                cash_received: self.tendered,
                change: self.evaluation().change,
            }
        } else {
            Settlement {
                method: self.method,
                total_due: self.total_due,
                cash_received: self.total_due,
                change: Money::zero(),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
