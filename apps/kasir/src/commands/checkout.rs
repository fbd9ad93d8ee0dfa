//! # Checkout Commands
//!
//! The payment panel and recording a sale.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Panel                                       │
//! │                                                                         │
//! │  Total:        Rp 25.000                                                │
//! │  Metode:       [Tunai] [Transfer] [QRIS]      ◄── select_payment_method │
//! │                                                                         │
//! │  Uang diterima (cash only):                                             │
//! │    [5.000] [10.000] [20.000] [50.000] [100.000] ◄── add_quick_amount    │
//! │    [Uang Pas]  [Hapus]                          ◄── pay_exact / clear   │
//! │    ________                                     ◄── enter_tendered      │
//! │                                                                         │
//! │  Kembalian:    Rp 5.000                                                 │
//! │                                                                         │
//! │  [ Bayar ]  ──► process_payment                                         │
//! │                 1. busy flag (second press = BUSY)                      │
//! │                 2. cart not empty, cash covers total                    │
//! │                 3. SalesBackend::record_transaction                     │
//! │                 4. Ok: fresh session + receipt                          │
//! │                    Err: cart kept, TRANSACTION_FAILED                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use beras_core::{CoreError, Money, NewTransaction, NewTransactionLine, PaymentMethod, Tender};
use beras_db::SalesBackend;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, Session, SessionState};

/// Payment panel data.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub method: PaymentMethod,
    pub total_due: Money,
    pub tendered: Money,
    /// tendered − total. Negative while cash is short.
    pub change: Money,
    /// Change clamped at zero.
    pub display_change: Money,
    pub sufficient: bool,
    /// Whether the Bayar button is enabled.
    pub can_checkout: bool,
    pub quick_amounts: Vec<Money>,
}

impl CheckoutView {
    fn new(tender: &Tender, config: &ConfigState) -> Self {
        let evaluation = tender.evaluation();
        CheckoutView {
            method: tender.method,
            total_due: tender.total_due,
            tendered: tender.tendered,
            change: evaluation.change,
            display_change: evaluation.display_change,
            sufficient: evaluation.sufficient,
            can_checkout: tender.can_checkout(),
            quick_amounts: config.quick_amounts.clone(),
        }
    }
}

/// Shown on the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub transaction_id: String,
    pub receipt_code: String,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub cash_received: Money,
    pub change: Money,
}

fn update_tender<F>(session: &SessionState, config: &ConfigState, f: F) -> ApiResult<CheckoutView>
where
    F: FnOnce(Tender) -> Tender,
{
    let next = session.update(|s| Session {
        tender: f(s.tender),
        ..s
    })?;
    Ok(CheckoutView::new(&next.tender, config))
}

pub fn get_checkout(session: &SessionState, config: &ConfigState) -> CheckoutView {
    debug!("get_checkout command");
    CheckoutView::new(&session.snapshot().tender, config)
}

/// Switches between Tunai, Transfer and QRIS. Tendered cash is kept.
pub fn select_payment_method(
    session: &SessionState,
    config: &ConfigState,
    method: PaymentMethod,
) -> ApiResult<CheckoutView> {
    debug!(method = %method.as_str(), "select_payment_method command");
    update_tender(session, config, |t| t.with_method(method))
}

/// Adds a quick-amount button's value to the tendered cash.
pub fn add_quick_amount(
    session: &SessionState,
    config: &ConfigState,
    amount: Money,
) -> ApiResult<CheckoutView> {
    debug!(amount = %amount, "add_quick_amount command");

    if !amount.is_positive() {
        return Err(ApiError::validation("Quick amount must be positive"));
    }

    update_tender(session, config, |t| t.quick_amount(amount))
}

/// "Uang Pas": tendered cash equals the total.
pub fn pay_exact(session: &SessionState, config: &ConfigState) -> ApiResult<CheckoutView> {
    debug!("pay_exact command");
    update_tender(session, config, Tender::exact)
}

pub fn clear_tendered(session: &SessionState, config: &ConfigState) -> ApiResult<CheckoutView> {
    debug!("clear_tendered command");
    update_tender(session, config, Tender::cleared)
}

/// Replaces tendered cash with typed text. Unreadable text counts as zero.
pub fn enter_tendered(
    session: &SessionState,
    config: &ConfigState,
    text: &str,
) -> ApiResult<CheckoutView> {
    debug!(text = %text, "enter_tendered command");
    update_tender(session, config, |t| t.with_entered_text(text))
}

/// Records the sale in progress.
///
/// ## Errors
/// - `BUSY`: another payment is still being recorded
/// - `VALIDATION_ERROR`: the cart is empty
/// - `INSUFFICIENT_CASH`: cash payment below the total, nothing changes
/// - `TRANSACTION_FAILED`: the backend refused or failed; the cart is kept
pub async fn process_payment<B: SalesBackend>(
    backend: &B,
    session: &SessionState,
    cashier_id: Option<String>,
) -> ApiResult<CheckoutReceipt> {
    debug!("process_payment command");

    let (guard, snapshot) = session.try_begin_checkout().ok_or_else(|| {
        warn!("Payment already in progress");
        ApiError::busy()
    })?;

    if snapshot.cart.is_empty() {
        return Err(ApiError::validation("Cart is empty"));
    }

    let tender = snapshot.tender;
    if !tender.can_checkout() {
        return Err(CoreError::InsufficientCash {
            total_due: tender.total_due,
            tendered: tender.tendered,
        }
        .into());
    }

    let settlement = tender.settlement();
    let sale = NewTransaction {
        cashier_id,
        payment_method: settlement.method,
        total_amount: settlement.total_due,
        cash_received: settlement.cash_received,
        change_amount: settlement.change,
        lines: snapshot
            .cart
            .items()
            .iter()
            .map(|item| NewTransactionLine {
                product_id: item.id.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.subtotal(),
            })
            .collect(),
    };

    let recorded = match backend.record_transaction(&sale).await {
        Ok(recorded) => recorded,
        Err(e) => {
            error!(error = %e, total = %sale.total_amount, "Failed to record transaction");
            return Err(ApiError::transaction_failed());
        }
    };

    session.finish_checkout(guard);

    info!(
        transaction_id = %recorded.id,
        receipt_code = %recorded.receipt_code,
        total = %sale.total_amount,
        method = %sale.payment_method.as_str(),
        lines = sale.lines.len(),
        "Payment recorded"
    );

    Ok(CheckoutReceipt {
        transaction_id: recorded.id,
        receipt_code: recorded.receipt_code,
        total_amount: sale.total_amount,
        payment_method: sale.payment_method,
        cash_received: sale.cash_received,
        change: sale.change_amount,
    })
}
