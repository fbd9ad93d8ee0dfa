//! # Cart Ledger
//!
//! The in-progress list of line items for one sale.
//!
//! ## Reducer Style
//! Every operation consumes the cart and returns the next one. The session
//! layer owns the only mutable reference and swaps the value in place.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Ledger Operations                            │
//! │                                                                         │
//! │  Cashier Action           Operation                 Resulting Cart      │
//! │  ──────────────           ─────────                 ──────────────      │
//! │                                                                         │
//! │  Tap product ───────────► add(product) ──────────► qty += 0.5 or push  │
//! │                                                                         │
//! │  Type "2.5" ────────────► set_quantity(id, 2.5) ─► qty = 2.5           │
//! │                                                                         │
//! │  Press − ───────────────► adjust_quantity(-0.5) ─► qty -= 0.5          │
//! │                                                   (≤ 0 → removed)      │
//! │                                                                         │
//! │  Press trash ───────────► remove(id) ────────────► item gone           │
//! │                                                                         │
//! │  Totals ────────────────► totals() ──────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage
//! Items live in a `Vec` (display order = insertion order) with a side index
//! from product id to position, so merging on add never scans the list.
//!
//! ## Example
//! ```rust
//! use beras_core::cart::Cart;
//! use beras_core::{Money, Product, ProductCategory};
//! use rust_decimal::Decimal;
//!
//! let ir64 = Product::new("ir64", "Beras IR64", Money::from_rupiah(12_000), "kg",
//!     ProductCategory::Kiloan, Decimal::from(40));
//!
//! let cart = Cart::new().add(&ir64).add(&ir64).add(&ir64);
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.totals().total_items, Decimal::new(15, 1)); // 1.5 kg
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Quantity};
use crate::CART_STEP;

// =============================================================================
// Line Item
// =============================================================================

/// One product line in the cart.
///
/// Name, price and unit are frozen when the product is first added. A later
/// price change in the catalog does not touch items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product id. Unique within a cart.
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub unit: String,
    /// Always > 0 while the item is in the cart.
    #[ts(type = "string")]
    pub quantity: Quantity,
}

impl LineItem {
    fn from_product(product: &Product, quantity: Quantity) -> Self {
        LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            unit: product.unit.clone(),
            quantity,
        }
    }

    /// Exact line total (quantity × unit price), not rounded.
    #[inline]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Line total rounded to whole rupiah, as stored on a transaction line.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_decimal_rounded(self.line_total())
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart values. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Σ quantity.
    #[ts(type = "string")]
    pub total_items: Quantity,
    /// Σ quantity × unit price, exact.
    #[ts(type = "string")]
    pub total_price: Decimal,
}

// =============================================================================
// Cart
// =============================================================================

/// Ordered ledger of line items keyed by product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
    index: HashMap<String, usize>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one step (0.5) of a product.
    ///
    /// Merges into the existing line when the product is already in the cart.
    pub fn add(self, product: &Product) -> Self {
        self.add_step(product, CART_STEP)
    }

    /// Adds `step` of a product. Used when the shop configures another step.
    ///
    /// A non-positive step leaves the cart unchanged.
    pub fn add_step(mut self, product: &Product, step: Quantity) -> Self {
        if step <= Decimal::ZERO {
            return self;
        }

        match self.index.get(&product.id) {
            Some(&pos) => {
                let item = &mut self.items[pos];
                item.quantity = (item.quantity + step).normalize();
            }
            None => {
                self.index.insert(product.id.clone(), self.items.len());
                self.items
                    .push(LineItem::from_product(product, step.normalize()));
            }
        }
        self
    }

    /// Replaces the quantity of a line.
    ///
    /// A quantity ≤ 0 removes the line. Unknown ids are ignored.
    pub fn set_quantity(mut self, id: &str, quantity: Quantity) -> Self {
        if quantity <= Decimal::ZERO {
            return self.remove(id);
        }
        if let Some(&pos) = self.index.get(id) {
            self.items[pos].quantity = quantity.normalize();
        }
        self
    }

    /// Removes a line. Unknown ids are ignored.
    pub fn remove(mut self, id: &str) -> Self {
        if let Some(pos) = self.index.remove(id) {
            self.items.remove(pos);
            self.reindex();
        }
        self
    }

    /// Moves a line's quantity by `delta` (the +/- stepper).
    ///
    /// Landing on or below zero removes the line.
    pub fn adjust_quantity(self, id: &str, delta: Quantity) -> Self {
        match self.get(id).map(|item| item.quantity) {
            Some(current) => self.set_quantity(id, current + delta),
            None => self,
        }
    }

    /// Empties the cart.
    pub fn clear(self) -> Self {
        Cart::new()
    }

    /// Sums quantities and line totals in insertion order.
    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::default(), |acc, item| CartTotals {
                total_items: acc.total_items + item.quantity,
                total_price: acc.total_price + item.line_total(),
            })
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();
    }
}

impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<LineItem>> for Cart {
    /// Rebuilds a cart, merging duplicate ids and dropping non-positive lines.
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity <= Decimal::ZERO {
                continue;
            }
            match cart.index.get(&item.id) {
                Some(&pos) => cart.items[pos].quantity += item.quantity,
                None => {
                    cart.index.insert(item.id.clone(), cart.items.len());
                    cart.items.push(item);
                }
            }
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Parses a direct quantity edit from the cart's number field.
///
/// Returns `None` for anything that is not a number greater than zero. The
/// caller keeps the previous quantity in that case.
pub fn parse_quantity_input(text: &str) -> Option<Quantity> {
    let trimmed = text.trim().replace(',', ".");
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|q| *q > Decimal::ZERO)
        .map(|q| q.normalize())
}

// =============================================================================
// Unit Tests
// =============================================================================
