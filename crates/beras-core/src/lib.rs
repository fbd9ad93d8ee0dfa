//! # beras-core: Pure Business Logic for Kasir Beras
//!
//! This crate holds the point-of-sale logic of the rice shop register
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Beras Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web shell (UI)                               │   │
//! │  │    Search ──► Cart ──► Checkout ──► Success ──► History         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir commands                               │   │
//! │  │    add_to_cart, add_quick_amount, process_payment, etc.         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ beras-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │   │
//! │  │   │  cart    │ │ payment  │ │ catalog  │ │ history  │           │   │
//! │  │   │  Cart    │ │  Tender  │ │  filter  │ │  Daily   │           │   │
//! │  │   │ LineItem │ │  quote   │ │  groups  │ │ Summary  │           │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    beras-db (SalesBackend)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PaymentMethod, transactions)
//! - [`money`] - Whole-rupiah money type
//! - [`cart`] - Cart ledger (merge-by-id, half-unit quantity steps)
//! - [`payment`] - Payment calculator (quote, quick amounts, change)
//! - [`catalog`] - Product search and grouping
//! - [`history`] - Day bounds and daily sales summaries
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use beras_core::cart::Cart;
//! use beras_core::payment::{apply_quick_amount, evaluate, quote};
//! use beras_core::{Money, Product, ProductCategory};
//! use rust_decimal::Decimal;
//!
//! let pandan = Product::new("p-1", "Beras Pandan Wangi", Money::from_rupiah(16_000), "kg",
//!     ProductCategory::Kiloan, Decimal::from(50));
//!
//! // Two taps on the product card = 1 kg
//! let cart = Cart::new().add(&pandan).add(&pandan);
//! let total = quote(&cart);
//! assert_eq!(total.rupiah(), 16_000);
//!
//! let tendered = apply_quick_amount(Money::zero(), Money::from_rupiah(20_000));
//! let result = evaluate(total, tendered);
//! assert_eq!(result.change.rupiah(), 4_000);
//! assert!(result.sufficient);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod history;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{ChangeEvaluation, Settlement, Tender};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity added per tap on a product, and per +/- stepper press.
///
/// Rice is sold in half units (½ kg, ½ L, ½ sack).
pub const CART_STEP: Quantity = rust_decimal::Decimal::from_parts(5, 0, 0, false, 1);

/// Stock at or below this level is reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Upper bound for a single line quantity when recording a sale.
///
/// ## Business Reason
/// Catches a mistyped quantity (e.g., 5000 instead of 5) before it reaches
/// the books. No sack order in this shop comes anywhere close.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Fixed UTC offset of the shop (WIB, UTC+7), in seconds.
pub const WIB_OFFSET_SECS: i32 = 7 * 3600;
