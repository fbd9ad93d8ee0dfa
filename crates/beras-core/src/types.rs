//! # Domain Types
//!
//! Core domain types used throughout Kasir Beras.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │ TransactionRecord   │   │ PaymentMethod   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id             │   │  id, receipt_code   │   │  Cash (Tunai)   │   │
//! │  │  name, unit     │   │  total_amount       │   │  Transfer       │   │
//! │  │  unit_price     │   │  payment_method     │   │  Qris           │   │
//! │  │  category       │   │  items[]            │   └─────────────────┘   │
//! │  │  stock          │   └─────────────────────┘                         │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐                         │
//! │  │ProductCategory  │   │  NewTransaction     │  ← handed to the        │
//! │  │  Literan        │   │  (checkout output)  │    SalesBackend         │
//! │  │  Kiloan         │   └─────────────────────┘                         │
//! │  │  Karungan       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

/// A product quantity: kilograms, litres or sacks, in half-unit steps.
pub type Quantity = Decimal;

// =============================================================================
// Product Category
// =============================================================================

/// How a product is measured out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Sold by the litre.
    Literan,
    /// Sold by the kilogram.
    Kiloan,
    /// Sold by the sack.
    Karungan,
}

impl ProductCategory {
    /// All categories, in catalog display order.
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Literan,
        ProductCategory::Kiloan,
        ProductCategory::Karungan,
    ];

    /// Stored/wire name (`"kiloan"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Literan => "literan",
            ProductCategory::Kiloan => "kiloan",
            ProductCategory::Karungan => "karungan",
        }
    }

    /// Badge label (`"Kiloan"`).
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Literan => "Literan",
            ProductCategory::Kiloan => "Kiloan",
            ProductCategory::Karungan => "Karungan",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literan" => Ok(ProductCategory::Literan),
            "kiloan" => Ok(ProductCategory::Kiloan),
            "karungan" => Ok(ProductCategory::Karungan),
            other => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Stock badge shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// More than 20 units on hand.
    High,
    /// Between 10 and 20 units.
    Medium,
    /// Under 10 units.
    Low,
}

impl StockLevel {
    /// Classifies a stock quantity.
    pub fn of(stock: Quantity) -> Self {
        if stock > Decimal::from(20) {
            StockLevel::High
        } else if stock >= Decimal::from(10) {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4 for products created locally).
    pub id: String,

    /// Display name (e.g., "Beras Pandan Wangi").
    pub name: String,

    /// Price per unit in whole rupiah.
    pub unit_price: Money,

    /// Unit label shown after the price (`kg`, `liter`, `karung`).
    pub unit: String,

    /// How the product is measured out.
    pub category: ProductCategory,

    /// Units on hand. Maintained by the backend, never by the cart.
    #[ts(type = "string")]
    pub stock: Quantity,

    /// Optional longer description for the product list.
    pub description: Option<String>,
}

impl Product {
    /// Creates a product without a description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        unit: impl Into<String>,
        category: ProductCategory,
        stock: Quantity,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            unit: unit.into(),
            category,
            stock,
            description: None,
        }
    }

    /// Returns the stock badge level.
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// Checks whether the product needs restocking.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= Decimal::from(LOW_STOCK_THRESHOLD)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash ("Tunai"). The only method with tendered/change.
    #[default]
    Cash,
    /// Bank transfer.
    Transfer,
    /// QRIS instant payment (opaque tag).
    Qris,
}

impl PaymentMethod {
    /// All methods, in the order the checkout screen lists them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Qris,
    ];

    /// Returns true for cash.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    /// Stored/wire name (`"qris"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Qris => "qris",
        }
    }

    /// Label shown to the cashier.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Qris => "QRIS",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "tunai" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            "qris" => Ok(PaymentMethod::Qris),
            other => Err(ValidationError::InvalidFormat {
                field: "payment_method".to_string(),
                reason: format!("unknown payment method '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Transactions (recording)
// =============================================================================

/// A line of a sale about to be recorded.
///
/// Uses the snapshot price from the cart, not the live product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTransactionLine {
    pub product_id: String,
    #[ts(type = "string")]
    pub quantity: Quantity,
    pub unit_price: Money,
    /// quantity × unit_price, rounded to whole rupiah.
    pub subtotal: Money,
}

/// A completed sale handed to the transaction recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTransaction {
    /// Signed-in cashier, if the shell knows one.
    pub cashier_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub total_amount: Money,
    /// Cash handed over. Equal to the total for non-cash methods.
    pub cash_received: Money,
    /// Change returned. Zero for non-cash methods.
    pub change_amount: Money,
    pub lines: Vec<NewTransactionLine>,
}

/// Identity of a transaction once the backend accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordedTransaction {
    /// Primary key (UUID v4).
    pub id: String,
    /// Short code printed on the success screen (8 chars, A-Z0-9).
    pub receipt_code: String,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
}

// =============================================================================
// Transactions (history)
// =============================================================================

/// A sold line as shown in the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionLine {
    pub product_id: String,
    pub product_name: String,
    pub unit: String,
    #[ts(type = "string")]
    pub quantity: Quantity,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A recorded transaction with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionRecord {
    pub id: String,
    pub receipt_code: String,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub cash_received: Money,
    pub change_amount: Money,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
    pub items: Vec<TransactionLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================
