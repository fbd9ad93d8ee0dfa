//! In-memory [`SalesBackend`] for command tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use beras_core::history::local_date;
use beras_core::{
    Money, NewTransaction, Product, ProductCategory, RecordedTransaction, TransactionLine,
    TransactionRecord, WIB_OFFSET_SECS,
};
use beras_db::repository::transaction::generate_receipt_code;
use beras_db::{DbError, DbResult, SalesBackend};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeBackend {
    products: Mutex<Vec<Product>>,
    recorded: Mutex<Vec<TransactionRecord>>,
    fail_record: AtomicBool,
    gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn with_products(products: Vec<Product>) -> Self {
        FakeBackend {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    /// Every record call waits for one `notify_one` on the gate.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_record.store(failing, Ordering::SeqCst);
    }

    pub fn recorded(&self) -> Vec<TransactionRecord> {
        self.recorded.lock().unwrap().clone()
    }
}

impl SalesBackend for FakeBackend {
    async fn fetch_products(&self) -> DbResult<Vec<Product>> {
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn fetch_product(&self, id: &str) -> DbResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn record_transaction(&self, sale: &NewTransaction) -> DbResult<RecordedTransaction> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail_record.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed("disk I/O error".to_string()));
        }

        let products = self.products.lock().unwrap().clone();
        let mut recorded = self.recorded.lock().unwrap();

        let id = format!("tx-{}", recorded.len() + 1);
        let now = Utc::now();
        let items = sale
            .lines
            .iter()
            .map(|line| {
                let product = products.iter().find(|p| p.id == line.product_id);
                TransactionLine {
                    product_id: line.product_id.clone(),
                    product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
                    unit: product.map(|p| p.unit.clone()).unwrap_or_default(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    subtotal: line.subtotal,
                }
            })
            .collect();

        let record = TransactionRecord {
            id: id.clone(),
            receipt_code: generate_receipt_code(),
            total_amount: sale.total_amount,
            payment_method: sale.payment_method,
            cash_received: sale.cash_received,
            change_amount: sale.change_amount,
            transaction_date: now,
            items,
        };
        let receipt_code = record.receipt_code.clone();
        recorded.insert(0, record);

        Ok(RecordedTransaction {
            id,
            receipt_code,
            transaction_date: now,
        })
    }

    async fn fetch_transactions_for_date(&self, date: NaiveDate) -> DbResult<Vec<TransactionRecord>> {
        Ok(self
            .recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|r| local_date(r.transaction_date, WIB_OFFSET_SECS) == date)
            .cloned()
            .collect())
    }
}

pub fn product(id: &str, name: &str, price: i64, category: ProductCategory, stock: i64) -> Product {
    let unit = match category {
        ProductCategory::Literan => "liter",
        ProductCategory::Kiloan => "kg",
        ProductCategory::Karungan => "karung",
    };
    Product::new(id, name, Money::from_rupiah(price), unit, category, Decimal::from(stock))
}

pub fn rice_shop() -> FakeBackend {
    FakeBackend::with_products(vec![
        product("p-pandan", "Beras Pandan Wangi", 16_000, ProductCategory::Kiloan, 120),
        product("p-rojo", "Beras Rojolele", 14_500, ProductCategory::Kiloan, 8),
        product("p-ketan", "Beras Ketan Putih", 18_000, ProductCategory::Literan, 40),
        product("p-karung", "Beras IR64 25kg", 310_000, ProductCategory::Karungan, 25),
    ])
}
