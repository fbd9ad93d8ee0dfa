//! # Product Commands
//!
//! Product list for the left-hand panel of the register.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  Cashier types "pandan"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_products(query)                                                 │
//! │       │  validate_search_query: trim, max 100 chars                     │
//! │       ▼                                                                 │
//! │  SalesBackend::fetch_products()  (ordered by name)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog::filter_products: name, category or price digits               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductView>, or grouped per category for catalog_by_category      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use beras_core::catalog::{filter_products, group_by_category, low_stock_at};
use beras_core::validation::validate_search_query;
use beras_core::{Money, Product, ProductCategory, StockLevel};
use beras_db::SalesBackend;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::ConfigState;

/// Product card data.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub unit: String,
    pub category: ProductCategory,
    /// "Literan", "Kiloan" or "Karungan".
    pub category_label: String,
    #[ts(type = "string")]
    pub stock: Decimal,
    pub stock_level: StockLevel,
    pub description: Option<String>,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        ProductView {
            stock_level: p.stock_level(),
            category_label: p.category.label().to_string(),
            id: p.id,
            name: p.name,
            unit_price: p.unit_price,
            unit: p.unit,
            category: p.category,
            stock: p.stock,
            description: p.description,
        }
    }
}

/// One section of the grouped product list.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub category: ProductCategory,
    pub label: String,
    pub products: Vec<ProductView>,
}

pub async fn list_products<B: SalesBackend>(backend: &B) -> ApiResult<Vec<ProductView>> {
    debug!("list_products command");
    let products = backend.fetch_products().await?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// Products matching a free-text query. An empty query lists everything.
pub async fn search_products<B: SalesBackend>(
    backend: &B,
    query: &str,
) -> ApiResult<Vec<ProductView>> {
    debug!(query = %query, "search_products command");

    let query = validate_search_query(query)?;
    let products = backend.fetch_products().await?;

    let matches = filter_products(&products, &query);
    debug!(count = matches.len(), "Search complete");

    Ok(matches.into_iter().map(ProductView::from).collect())
}

/// Matching products grouped by category. Empty groups are left out.
pub async fn catalog_by_category<B: SalesBackend>(
    backend: &B,
    query: &str,
) -> ApiResult<Vec<CategoryView>> {
    debug!(query = %query, "catalog_by_category command");

    let query = validate_search_query(query)?;
    let products = backend.fetch_products().await?;
    let matches = filter_products(&products, &query);

    Ok(group_by_category(&matches)
        .into_iter()
        .map(|group| CategoryView {
            category: group.category,
            label: group.category.label().to_string(),
            products: group.products.into_iter().map(ProductView::from).collect(),
        })
        .collect())
}

/// Products at or below the configured low-stock threshold.
pub async fn low_stock_products<B: SalesBackend>(
    backend: &B,
    config: &ConfigState,
) -> ApiResult<Vec<ProductView>> {
    debug!(threshold = %config.low_stock_threshold, "low_stock_products command");

    let products = backend.fetch_products().await?;
    Ok(low_stock_at(&products, config.low_stock_threshold)
        .into_iter()
        .map(ProductView::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::rice_shop;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let backend = rice_shop();
        let names: Vec<_> = list_products(&backend)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Beras IR64 25kg",
                "Beras Ketan Putih",
                "Beras Pandan Wangi",
                "Beras Rojolele"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_by_name_category_and_price() {
        let backend = rice_shop();

        let by_name = search_products(&backend, "  PANDAN ").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "p-pandan");

        let by_category = search_products(&backend, "literan").await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].category_label, "Literan");

        let by_price = search_products(&backend, "14500").await.unwrap();
        assert_eq!(by_price[0].id, "p-rojo");

        let everything = search_products(&backend, "").await.unwrap();
        assert_eq!(everything.len(), 4);
    }

    #[tokio::test]
    async fn test_overlong_query_is_rejected() {
        let backend = rice_shop();
        let err = search_products(&backend, &"a".repeat(101)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_catalog_groups_skip_empty_categories() {
        let backend = rice_shop();

        let groups = catalog_by_category(&backend, "beras").await.unwrap();
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                ProductCategory::Literan,
                ProductCategory::Kiloan,
                ProductCategory::Karungan
            ]
        );
        assert_eq!(groups[1].products.len(), 2);

        let groups = catalog_by_category(&backend, "rojolele").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Kiloan");
    }

    #[tokio::test]
    async fn test_low_stock_uses_configured_threshold() {
        let backend = rice_shop();

        let low = low_stock_products(&backend, &ConfigState::default()).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "p-rojo");
        assert_eq!(low[0].stock_level, StockLevel::Low);

        let config = ConfigState {
            low_stock_threshold: Decimal::from(30),
            ..ConfigState::default()
        };
        let low = low_stock_products(&backend, &config).await.unwrap();
        assert_eq!(low.len(), 2);
    }
}
