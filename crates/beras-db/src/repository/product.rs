//! # Product Repository
//!
//! Catalog reads for the register and product page, plus the writes the
//! seed tool and stock corrections need.
//!
//! ```text
//! POS screen       ──► list()              ORDER BY name
//! Products page    ──► list_by_category()  ORDER BY category, name
//! Seed tool        ──► insert()
//! ```
//!
//! Stock is stored as a decimal string so half units survive untouched.

use beras_core::{Money, Product, ProductCategory, Quantity};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, name, unit_price, unit, category, stock, description";

/// A `products` row as stored.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: String,
    name: String,
    unit_price: i64,
    unit: String,
    category: ProductCategory,
    stock: String,
    description: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        let stock = parse_quantity("stock", &row.stock)?;
        Ok(Product {
            id: row.id,
            name: row.name,
            unit_price: Money::from_rupiah(row.unit_price),
            unit: row.unit,
            category: row.category,
            stock,
            description: row.description,
        })
    }
}

/// Parses a stored decimal string.
pub(crate) fn parse_quantity(column: &str, value: &str) -> DbResult<Quantity> {
    value
        .parse::<Quantity>()
        .map_err(|_| DbError::invalid_data(column, value))
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// All products ordered by name (the register's product grid).
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY name, id", PRODUCT_COLUMNS);
        self.fetch(&sql).await
    }

    /// All products ordered by category, then name (the product page).
    pub async fn list_by_category(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY category, name, id",
            PRODUCT_COLUMNS
        );
        self.fetch(&sql).await
    }

    async fn fetch(&self, sql: &str) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Loaded products");
        rows.into_iter().map(Product::try_from).collect()
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, unit_price, unit, category, stock, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.unit_price.rupiah())
        .bind(&product.unit)
        .bind(product.category)
        .bind(product.stock.normalize().to_string())
        .bind(&product.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites the stock of a product (stock take).
    pub async fn set_stock(&self, id: &str, stock: Quantity) -> DbResult<()> {
        debug!(id = %id, stock = %stock, "Setting product stock");

        let result = sqlx::query("UPDATE products SET stock = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(stock.normalize().to_string())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
