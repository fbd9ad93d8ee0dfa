//! # History Commands
//!
//! The day's sales list with its header summary.

use beras_core::history::{local_date, DailySummary};
use beras_core::TransactionRecord;
use beras_db::SalesBackend;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::ConfigState;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    /// Local calendar date, `YYYY-MM-DD`.
    #[ts(type = "string")]
    pub date: NaiveDate,
    pub summary: DailySummary,
    /// Newest first, each with its lines.
    pub transactions: Vec<TransactionRecord>,
}

pub async fn transactions_for_date<B: SalesBackend>(
    backend: &B,
    date: NaiveDate,
) -> ApiResult<HistoryView> {
    debug!(%date, "transactions_for_date command");

    let transactions = backend.fetch_transactions_for_date(date).await?;
    let summary = DailySummary::from_records(&transactions);
    debug!(
        count = summary.transaction_count,
        revenue = %summary.total_revenue,
        "History loaded"
    );

    Ok(HistoryView {
        date,
        summary,
        transactions,
    })
}

/// History for the shop's current local date.
pub async fn transactions_today<B: SalesBackend>(
    backend: &B,
    config: &ConfigState,
) -> ApiResult<HistoryView> {
    let today = local_date(Utc::now(), config.utc_offset_secs);
    transactions_for_date(backend, today).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::checkout::{pay_exact, process_payment, select_payment_method};
    use crate::commands::test_support::rice_shop;
    use crate::state::SessionState;
    use beras_core::{Money, PaymentMethod};
    use beras_db::{Database, DbConfig};
    use chrono::Duration;

    async fn sell<B: SalesBackend>(backend: &B, product_id: &str, taps: usize, method: PaymentMethod) {
        let session = SessionState::new();
        let config = ConfigState::default();
        for _ in 0..taps {
            add_to_cart(backend, &session, &config, product_id).await.unwrap();
        }
        select_payment_method(&session, &config, method).unwrap();
        pay_exact(&session, &config).unwrap();
        process_payment(backend, &session, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_today_lists_sales_with_summary() {
        let backend = rice_shop();
        let config = ConfigState::default();
        sell(&backend, "p-pandan", 2, PaymentMethod::Cash).await;
        sell(&backend, "p-ketan", 1, PaymentMethod::Qris).await;

        let view = transactions_today(&backend, &config).await.unwrap();

        assert_eq!(view.transactions.len(), 2);
        assert_eq!(view.summary.transaction_count, 2);
        assert_eq!(view.summary.total_revenue, Money::from_rupiah(25_000));

        let qris = view
            .summary
            .by_method
            .iter()
            .find(|m| m.method == PaymentMethod::Qris)
            .unwrap();
        assert_eq!(qris.count, 1);
        assert_eq!(qris.revenue, Money::from_rupiah(9_000));

        // Newest first
        assert_eq!(view.transactions[0].items[0].product_id, "p-ketan");
    }

    #[tokio::test]
    async fn test_other_day_is_empty() {
        let backend = rice_shop();
        let config = ConfigState::default();
        sell(&backend, "p-pandan", 1, PaymentMethod::Cash).await;

        let today = local_date(Utc::now(), config.utc_offset_secs);
        let view = transactions_for_date(&backend, today - Duration::days(1))
            .await
            .unwrap();

        assert!(view.transactions.is_empty());
        assert_eq!(view.summary.total_revenue, Money::zero());
        assert_eq!(view.summary.by_method.len(), 3);
    }

    #[tokio::test]
    async fn test_history_from_sqlite_has_nested_lines() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for product in rice_shop().fetch_products().await.unwrap() {
            db.products().insert(&product).await.unwrap();
        }
        sell(&db, "p-karung", 2, PaymentMethod::Transfer).await;

        let view = transactions_today(&db, &ConfigState::default()).await.unwrap();

        assert_eq!(view.transactions.len(), 1);
        let line = &view.transactions[0].items[0];
        assert_eq!(line.product_name, "Beras IR64 25kg");
        assert_eq!(line.unit, "karung");
        assert_eq!(line.subtotal, Money::from_rupiah(310_000));
        assert_eq!(view.summary.total_revenue, Money::from_rupiah(310_000));
    }
}
