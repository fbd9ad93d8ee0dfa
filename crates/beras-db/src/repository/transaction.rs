//! # Transaction Repository
//!
//! Records completed sales and reads them back for the history screen.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record(NewTransaction)                               │
//! │                                                                         │
//! │  validate (beras-core)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─────────────────────────────────────────────────────────┐      │
//! │  │  INSERT transactions           (header, receipt code)        │      │
//! │  │  for each line:                                              │      │
//! │  │     INSERT transaction_items   (FK → products)               │      │
//! │  │     UPDATE products.stock      (stock − quantity)            │      │
//! │  COMMIT ◄───────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! │  Any failure before COMMIT rolls everything back: no header without     │
//! │  its lines, no stock moved for a sale that was not stored.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use beras_core::history::DayBounds;
use beras_core::validation::validate_new_transaction;
use beras_core::{
    Money, NewTransaction, PaymentMethod, RecordedTransaction, TransactionLine, TransactionRecord,
};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::product::parse_quantity;

/// Length of the code printed on the success screen.
pub const RECEIPT_CODE_LEN: usize = 8;

const RECEIPT_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, sqlx::FromRow)]
struct HeaderRow {
    id: String,
    receipt_code: String,
    total_amount: i64,
    payment_method: PaymentMethod,
    cash_received: i64,
    change_amount: i64,
    transaction_date: String,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    transaction_id: String,
    product_id: String,
    product_name: String,
    unit: String,
    quantity: String,
    unit_price: i64,
    subtotal: i64,
}

impl TryFrom<LineRow> for TransactionLine {
    type Error = DbError;

    fn try_from(row: LineRow) -> DbResult<Self> {
        Ok(TransactionLine {
            quantity: parse_quantity("quantity", &row.quantity)?,
            product_id: row.product_id,
            product_name: row.product_name,
            unit: row.unit,
            unit_price: Money::from_rupiah(row.unit_price),
            subtotal: Money::from_rupiah(row.subtotal),
        })
    }
}

/// Repository for recorded sales.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Stores a sale, its lines and the stock movement in one transaction.
    pub async fn record(&self, sale: &NewTransaction) -> DbResult<RecordedTransaction> {
        validate_new_transaction(sale)?;

        let id = Uuid::new_v4().to_string();
        let receipt_code = generate_receipt_code();
        let transaction_date = Utc::now().trunc_subsecs(3);

        debug!(
            id = %id,
            receipt_code = %receipt_code,
            lines = sale.lines.len(),
            total = %sale.total_amount,
            "Recording transaction"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, receipt_code, cashier_id, total_amount, payment_method,
                cash_received, change_amount, transaction_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&id)
        .bind(&receipt_code)
        .bind(&sale.cashier_id)
        .bind(sale.total_amount.rupiah())
        .bind(sale.payment_method)
        .bind(sale.cash_received.rupiah())
        .bind(sale.change_amount.rupiah())
        .bind(format_timestamp(transaction_date))
        .execute(&mut *tx)
        .await?;

        for (line_no, line) in sale.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO transaction_items (
                    id, transaction_id, product_id, line_no, quantity, unit_price, subtotal
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(&line.product_id)
            .bind(line_no as i64)
            .bind(line.quantity.normalize().to_string())
            .bind(line.unit_price.rupiah())
            .bind(line.subtotal.rupiah())
            .execute(&mut *tx)
            .await?;

            let stock: Option<String> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                .bind(&line.product_id)
                .fetch_optional(&mut *tx)
                .await?;
            let stock = match stock {
                Some(stock) => parse_quantity("stock", &stock)?,
                None => return Err(DbError::not_found("Product", line.product_id.as_str())),
            };

            let remaining = stock - line.quantity;
            if remaining.is_sign_negative() {
                warn!(product_id = %line.product_id, stock = %remaining, "Stock went negative");
            }

            sqlx::query("UPDATE products SET stock = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(&line.product_id)
                .bind(remaining.normalize().to_string())
                .bind(format_timestamp(transaction_date))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(id = %id, receipt_code = %receipt_code, "Transaction recorded");

        Ok(RecordedTransaction {
            id,
            receipt_code,
            transaction_date,
        })
    }

    /// Transactions inside a day, newest first, each with its lines.
    pub async fn list_for_day(&self, bounds: DayBounds) -> DbResult<Vec<TransactionRecord>> {
        let start = format_timestamp(bounds.start);
        let end = format_timestamp(bounds.end);

        debug!(start = %start, end = %end, "Loading transactions for day");

        let headers: Vec<HeaderRow> = sqlx::query_as(
            r#"
            SELECT id, receipt_code, total_amount, payment_method,
                   cash_received, change_amount, transaction_date
            FROM transactions
            WHERE transaction_date BETWEEN ?1 AND ?2
            ORDER BY transaction_date DESC, id
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_all(&self.pool)
        .await?;

        let line_rows: Vec<LineRow> = sqlx::query_as(
            r#"
            SELECT i.transaction_id, i.product_id, p.name AS product_name, p.unit,
                   i.quantity, i.unit_price, i.subtotal
            FROM transaction_items i
            JOIN transactions t ON t.id = i.transaction_id
            JOIN products p ON p.id = i.product_id
            WHERE t.transaction_date BETWEEN ?1 AND ?2
            ORDER BY i.transaction_id, i.line_no
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_all(&self.pool)
        .await?;

        let mut lines: HashMap<String, Vec<TransactionLine>> = HashMap::new();
        for row in line_rows {
            let key = row.transaction_id.clone();
            lines.entry(key).or_default().push(TransactionLine::try_from(row)?);
        }

        headers
            .into_iter()
            .map(|header| {
                let items = lines.remove(&header.id).unwrap_or_default();
                Ok(TransactionRecord {
                    transaction_date: parse_timestamp(&header.transaction_date)?,
                    id: header.id,
                    receipt_code: header.receipt_code,
                    total_amount: Money::from_rupiah(header.total_amount),
                    payment_method: header.payment_method,
                    cash_received: Money::from_rupiah(header.cash_received),
                    change_amount: Money::from_rupiah(header.change_amount),
                    items,
                })
            })
            .collect()
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Millisecond RFC 3339 in UTC. Fixed width, so text order is time order.
fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::invalid_data("transaction_date", value))
}

/// Eight uppercase letters/digits drawn from a v4 UUID's random bits.
pub fn generate_receipt_code() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut code = String::with_capacity(RECEIPT_CODE_LEN);
    for _ in 0..RECEIPT_CODE_LEN {
        code.push(RECEIPT_ALPHABET[(bits % 36) as usize] as char);
        bits /= 36;
    }
    code
}
