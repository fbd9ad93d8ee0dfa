//! # Money Module
//!
//! Provides the `Money` type for rupiah amounts.
//!
//! ## Whole Rupiah Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The rupiah has no minor unit in day-to-day retail.                     │
//! │                                                                         │
//! │  Prices, totals, tendered cash and change are all integer counts        │
//! │  of rupiah (i64). Quantities are decimal (0.5 kg), so a line total      │
//! │  can land on half a rupiah:                                             │
//! │                                                                         │
//! │    1.5 kg × Rp 12.333 = Rp 18.499,5  (exact, Decimal)                  │
//! │                       → Rp 18.500    (rounded once, at the total)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beras_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_rupiah(12_000);
//! let line = price.multiply_quantity(Decimal::new(15, 1)); // 1.5 kg
//! assert_eq!(Money::from_decimal_rounded(line).rupiah(), 18_000);
//! assert_eq!(price.to_string(), "Rp 12.000");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: change can go negative while cash is still short
/// - **Single field tuple struct**: serializes as a plain JSON number
/// - **No floats**: decimal quantities are multiplied through [`Decimal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the value in whole rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Addition that stops at the i64 bounds instead of overflowing.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Clamps negative amounts to zero.
    ///
    /// Used for displaying change: a shortfall shows as `Rp 0`.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Returns the amount as an exact decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Multiplies a unit price by a decimal quantity, without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use beras_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::from_rupiah(15_001);
    /// let exact = unit_price.multiply_quantity(Decimal::new(5, 1)); // 0.5
    /// assert_eq!(exact, Decimal::new(75005, 1)); // 7500.5
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Decimal {
        self.to_decimal() * qty
    }

    /// Absolute value with dot thousands separators (`1.250.000`).
    pub fn grouped_digits(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Rounds a decimal amount to whole rupiah.
    ///
    /// Midpoints round away from zero (7500.5 → 7501, -7500.5 → -7501).
    /// Amounts beyond the i64 range saturate.
    pub fn from_decimal_rounded(amount: Decimal) -> Self {
        let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let rupiah = rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        Money(rupiah)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Indonesian display format: `Rp 1.250.000`.
///
/// ## Note
/// This mirrors `toLocaleString('id-ID')` on the receipt screens.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, self.grouped_digits())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupiah(0).to_string(), "Rp 0");
        assert_eq!(Money::from_rupiah(500).to_string(), "Rp 500");
        assert_eq!(Money::from_rupiah(5_000).to_string(), "Rp 5.000");
        assert_eq!(Money::from_rupiah(20_000).to_string(), "Rp 20.000");
        assert_eq!(Money::from_rupiah(125_000).to_string(), "Rp 125.000");
        assert_eq!(Money::from_rupiah(1_250_000).to_string(), "Rp 1.250.000");
        assert_eq!(Money::from_rupiah(-5_000).to_string(), "-Rp 5.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(10_000);
        let b = Money::from_rupiah(5_000);

        assert_eq!((a + b).rupiah(), 15_000);
        assert_eq!((b - a).rupiah(), -5_000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.rupiah(), 20_000);
    }

    #[test]
    fn test_saturating_add_stops_at_max() {
        let max = Money::from_rupiah(i64::MAX);
        assert_eq!(max.saturating_add(Money::from_rupiah(5_000)), max);
        assert_eq!(
            Money::from_rupiah(5_000).saturating_add(Money::from_rupiah(10_000)),
            Money::from_rupiah(15_000)
        );
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_rupiah(-5_000).clamp_non_negative(), Money::zero());
        assert_eq!(
            Money::from_rupiah(5_000).clamp_non_negative(),
            Money::from_rupiah(5_000)
        );
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        assert_eq!(Money::from_decimal_rounded(Decimal::new(75005, 1)).rupiah(), 7_501);
        assert_eq!(Money::from_decimal_rounded(Decimal::new(75004, 1)).rupiah(), 7_500);
        assert_eq!(Money::from_decimal_rounded(Decimal::new(-75005, 1)).rupiah(), -7_501);
    }

    #[test]
    fn test_multiply_half_quantity() {
        let price = Money::from_rupiah(13_000);
        let half = Decimal::new(5, 1);
        assert_eq!(price.multiply_quantity(half), Decimal::from(6_500));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_rupiah(15_000)).unwrap();
        assert_eq!(json, "15000");
    }
}
