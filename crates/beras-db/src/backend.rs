//! # Sales Backend
//!
//! The collaborator the register talks to for everything it does not own:
//! the product list, recording a sale and the day's history.
//!
//! ```text
//! kasir session ──► SalesBackend ──┬──► Database (SQLite, this crate)
//!                                  └──► test doubles in kasir
//! ```
//!
//! Methods return `Send` futures so a command can be driven from any tokio
//! worker.

use std::future::Future;

use beras_core::history::day_bounds_with_offset;
use beras_core::{NewTransaction, Product, RecordedTransaction, TransactionRecord};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;

pub trait SalesBackend: Send + Sync {
    /// Every product, ordered by name.
    fn fetch_products(&self) -> impl Future<Output = DbResult<Vec<Product>>> + Send;

    /// One product by id, `None` if it does not exist.
    fn fetch_product(&self, id: &str) -> impl Future<Output = DbResult<Option<Product>>> + Send;

    /// Stores a completed sale. All or nothing: header, lines and stock.
    fn record_transaction(
        &self,
        sale: &NewTransaction,
    ) -> impl Future<Output = DbResult<RecordedTransaction>> + Send;

    /// Sales made on a local calendar date, newest first, with their lines.
    fn fetch_transactions_for_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = DbResult<Vec<TransactionRecord>>> + Send;
}

impl SalesBackend for Database {
    async fn fetch_products(&self) -> DbResult<Vec<Product>> {
        self.products().list().await
    }

    async fn fetch_product(&self, id: &str) -> DbResult<Option<Product>> {
        self.products().get_by_id(id).await
    }

    async fn record_transaction(&self, sale: &NewTransaction) -> DbResult<RecordedTransaction> {
        self.transactions().record(sale).await
    }

    async fn fetch_transactions_for_date(&self, date: NaiveDate) -> DbResult<Vec<TransactionRecord>> {
        let bounds = day_bounds_with_offset(date, self.utc_offset_secs());
        debug!(%date, start = %bounds.start, end = %bounds.end, "Fetching history");
        self.transactions().list_for_day(bounds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use beras_core::history::local_date;
    use beras_core::{Money, NewTransactionLine, PaymentMethod, ProductCategory};
    use rust_decimal::Decimal;

    async fn backend() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = Product::new(
            "p-1",
            "Beras Pulen",
            Money::from_rupiah(13_000),
            "kg",
            ProductCategory::Kiloan,
            Decimal::from(12),
        );
        db.products().insert(&product).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_qris_sale_round_trip() {
        let db = backend().await;
        let sale = NewTransaction {
            cashier_id: None,
            payment_method: PaymentMethod::Qris,
            total_amount: Money::from_rupiah(26_000),
            cash_received: Money::from_rupiah(26_000),
            change_amount: Money::zero(),
            lines: vec![NewTransactionLine {
                product_id: "p-1".to_string(),
                quantity: Decimal::from(2),
                unit_price: Money::from_rupiah(13_000),
                subtotal: Money::from_rupiah(26_000),
            }],
        };

        let recorded = db.record_transaction(&sale).await.unwrap();
        let date = local_date(recorded.transaction_date, db.utc_offset_secs());
        let history = db.fetch_transactions_for_date(date).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].receipt_code, recorded.receipt_code);
        assert_eq!(history[0].payment_method, PaymentMethod::Qris);
        assert_eq!(history[0].transaction_date, recorded.transaction_date);

        let products = db.fetch_products().await.unwrap();
        assert_eq!(products[0].stock, Decimal::from(10));
        assert!(products[0].is_low_stock());
    }

    #[tokio::test]
    async fn test_fetch_product_by_id() {
        let db = backend().await;

        let product = db.fetch_product("p-1").await.unwrap().unwrap();
        assert_eq!(product.name, "Beras Pulen");
        assert!(db.fetch_product("p-missing").await.unwrap().is_none());
    }
}
