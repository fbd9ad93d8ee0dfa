//! # Cart Commands
//!
//! Cart manipulation for the sale in progress.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Success  │       │
//! │  │  Cart    │     │          │     │  Panel   │     │  Screen  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart      process_payment        │             │
//! │                   adjust / edit    (checkout.rs)          │             │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ─────────────────────► (back to empty)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation re-quotes the payment panel and fails with `BUSY` while
//! a checkout is being recorded.

use beras_core::cart::parse_quantity_input;
use beras_core::payment::quote;
use beras_core::validation::validate_quantity;
use beras_core::{Cart, LineItem, Money, Quantity};
use beras_db::SalesBackend;
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, Session, SessionState};

/// One cart row.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub unit_price: Money,
    #[ts(type = "string")]
    pub quantity: Quantity,
    /// Rounded to whole rupiah.
    pub subtotal: Money,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        LineItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            unit: item.unit.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal(),
        }
    }
}

/// Cart panel data.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItemView>,
    /// Σ quantity, e.g. "3.5".
    #[ts(type = "string")]
    pub total_items: Quantity,
    /// Amount due, rounded to whole rupiah.
    pub total_price: Money,
    /// Number of distinct lines.
    pub item_count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items().iter().map(LineItemView::from).collect(),
            total_items: cart.totals().total_items,
            total_price: quote(cart),
            item_count: cart.len(),
        }
    }
}

fn update_cart<F>(session: &SessionState, f: F) -> ApiResult<CartView>
where
    F: FnOnce(Cart) -> Cart,
{
    let next = session.update(|s| Session {
        cart: f(s.cart),
        ..s
    })?;
    Ok(CartView::from(&next.cart))
}

pub fn get_cart(session: &SessionState) -> CartView {
    debug!("get_cart command");
    CartView::from(&session.snapshot().cart)
}

/// Adds one step of a product. A second tap merges into the same line.
///
/// Fails with `VALIDATION_ERROR` when the merged quantity would pass
/// `MAX_ITEM_QUANTITY`.
pub async fn add_to_cart<B: SalesBackend>(
    backend: &B,
    session: &SessionState,
    config: &ConfigState,
    product_id: &str,
) -> ApiResult<CartView> {
    debug!(product_id = %product_id, "add_to_cart command");

    if session.is_busy() {
        return Err(ApiError::busy());
    }

    let product = backend
        .fetch_product(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let current = session
        .snapshot()
        .cart
        .get(product_id)
        .map_or(Quantity::ZERO, |item| item.quantity);
    validate_quantity(current + config.cart_step)?;

    let view = update_cart(session, |cart| cart.add_step(&product, config.cart_step))?;
    info!(product_id = %product_id, name = %product.name, "Added to cart");

    Ok(view)
}

/// Sets a line's quantity. Zero or less removes the line.
pub fn update_cart_item(
    session: &SessionState,
    product_id: &str,
    quantity: Quantity,
) -> ApiResult<CartView> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    if quantity > Quantity::ZERO {
        validate_quantity(quantity)?;
    }

    update_cart(session, |cart| cart.set_quantity(product_id, quantity))
}

/// Applies the text typed into a line's quantity field.
///
/// Text that is empty, not a number, or not positive cancels the edit and
/// leaves the cart as it was.
pub fn edit_cart_quantity(
    session: &SessionState,
    product_id: &str,
    text: &str,
) -> ApiResult<CartView> {
    debug!(product_id = %product_id, text = %text, "edit_cart_quantity command");

    match parse_quantity_input(text) {
        Some(quantity) => update_cart_item(session, product_id, quantity),
        None => {
            debug!("Quantity edit cancelled");
            Ok(get_cart(session))
        }
    }
}

/// The +/- stepper. Going to zero or below removes the line.
pub fn adjust_cart_item(
    session: &SessionState,
    product_id: &str,
    delta: Quantity,
) -> ApiResult<CartView> {
    debug!(product_id = %product_id, delta = %delta, "adjust_cart_item command");

    if let Some(item) = session.snapshot().cart.get(product_id) {
        let next = item.quantity + delta;
        if next > Quantity::ZERO {
            validate_quantity(next)?;
        }
    }

    update_cart(session, |cart| cart.adjust_quantity(product_id, delta))
}

pub fn remove_from_cart(session: &SessionState, product_id: &str) -> ApiResult<CartView> {
    debug!(product_id = %product_id, "remove_from_cart command");
    update_cart(session, |cart| cart.remove(product_id))
}

/// Empties the cart. Payment method and tendered cash are kept.
pub fn clear_cart(session: &SessionState) -> ApiResult<CartView> {
    debug!("clear_cart command");
    let view = update_cart(session, Cart::clear)?;
    info!("Cart cleared");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::rice_shop;
    use crate::error::ErrorCode;
    use beras_core::MAX_ITEM_QUANTITY;
    use rust_decimal::Decimal;

    fn half(n: i64) -> Decimal {
        Decimal::new(n * 5, 1)
    }

    #[tokio::test]
    async fn test_taps_merge_in_half_steps() {
        let backend = rice_shop();
        let session = SessionState::new();
        let config = ConfigState::default();

        add_to_cart(&backend, &session, &config, "p-pandan").await.unwrap();
        add_to_cart(&backend, &session, &config, "p-ketan").await.unwrap();
        let view = add_to_cart(&backend, &session, &config, "p-pandan").await.unwrap();

        assert_eq!(view.item_count, 2);
        assert_eq!(view.items[0].id, "p-pandan");
        assert_eq!(view.items[0].quantity, Decimal::ONE);
        assert_eq!(view.items[1].quantity, half(1));
        assert_eq!(view.total_items, half(3));
        // 1 kg × 16.000 + 0,5 L × 18.000
        assert_eq!(view.total_price, Money::from_rupiah(25_000));
        assert_eq!(
            session.snapshot().tender.total_due,
            Money::from_rupiah(25_000)
        );
    }

    #[tokio::test]
    async fn test_configured_step_is_used() {
        let backend = rice_shop();
        let session = SessionState::new();
        let config = ConfigState {
            cart_step: Decimal::ONE,
            ..ConfigState::default()
        };

        let view = add_to_cart(&backend, &session, &config, "p-karung").await.unwrap();
        assert_eq!(view.items[0].quantity, Decimal::ONE);
        assert_eq!(view.total_price, Money::from_rupiah(310_000));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let backend = rice_shop();
        let session = SessionState::new();

        let err = add_to_cart(&backend, &session, &ConfigState::default(), "p-missing")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&session).items.is_empty());
    }

    #[tokio::test]
    async fn test_tap_past_max_quantity_is_rejected() {
        let backend = rice_shop();
        let session = SessionState::new();
        let config = ConfigState::default();
        add_to_cart(&backend, &session, &config, "p-pandan").await.unwrap();
        update_cart_item(&session, "p-pandan", Decimal::from(MAX_ITEM_QUANTITY)).unwrap();

        let err = add_to_cart(&backend, &session, &config, "p-pandan")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            get_cart(&session).items[0].quantity,
            Decimal::from(MAX_ITEM_QUANTITY)
        );
    }

    #[tokio::test]
    async fn test_stepper_down_to_zero_removes_line() {
        let backend = rice_shop();
        let session = SessionState::new();
        add_to_cart(&backend, &session, &ConfigState::default(), "p-rojo")
            .await
            .unwrap();

        let view = adjust_cart_item(&session, "p-rojo", half(1)).unwrap();
        assert_eq!(view.items[0].quantity, Decimal::ONE);

        adjust_cart_item(&session, "p-rojo", -half(1)).unwrap();
        let view = adjust_cart_item(&session, "p-rojo", -half(1)).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.total_price, Money::zero());
    }

    #[tokio::test]
    async fn test_quantity_edit() {
        let backend = rice_shop();
        let session = SessionState::new();
        add_to_cart(&backend, &session, &ConfigState::default(), "p-pandan")
            .await
            .unwrap();

        let view = edit_cart_quantity(&session, "p-pandan", "2,5").unwrap();
        assert_eq!(view.items[0].quantity, half(5));
        assert_eq!(view.items[0].subtotal, Money::from_rupiah(40_000));

        // Garbage and zero leave the line alone
        let view = edit_cart_quantity(&session, "p-pandan", "abc").unwrap();
        assert_eq!(view.items[0].quantity, half(5));
        let view = edit_cart_quantity(&session, "p-pandan", "0").unwrap();
        assert_eq!(view.items[0].quantity, half(5));

        let err = edit_cart_quantity(&session, "p-pandan", "10000").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_and_unknown_is_ignored() {
        let backend = rice_shop();
        let session = SessionState::new();
        add_to_cart(&backend, &session, &ConfigState::default(), "p-pandan")
            .await
            .unwrap();

        let view = update_cart_item(&session, "p-other", Decimal::from(3)).unwrap();
        assert_eq!(view.item_count, 1);

        let view = update_cart_item(&session, "p-pandan", Decimal::ZERO).unwrap();
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let backend = rice_shop();
        let session = SessionState::new();
        let config = ConfigState::default();
        add_to_cart(&backend, &session, &config, "p-pandan").await.unwrap();
        add_to_cart(&backend, &session, &config, "p-ketan").await.unwrap();
        add_to_cart(&backend, &session, &config, "p-rojo").await.unwrap();

        let view = remove_from_cart(&session, "p-ketan").unwrap();
        let ids: Vec<_> = view.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p-pandan", "p-rojo"]);

        let view = clear_cart(&session).unwrap();
        assert_eq!(view.item_count, 0);
        assert_eq!(session.snapshot().tender.total_due, Money::zero());
    }

    #[tokio::test]
    async fn test_cart_is_locked_during_checkout() {
        let backend = rice_shop();
        let session = SessionState::new();
        let config = ConfigState::default();
        add_to_cart(&backend, &session, &config, "p-pandan").await.unwrap();

        let (_guard, _) = session.try_begin_checkout().unwrap();

        let err = add_to_cart(&backend, &session, &config, "p-ketan").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Busy);
        let err = clear_cart(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::Busy);
        assert_eq!(get_cart(&session).item_count, 1);
    }
}
