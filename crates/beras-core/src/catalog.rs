//! # Catalog
//!
//! Search and grouping over the product list shown on the register.
//!
//! ```text
//! "pandan"  ──► name contains "pandan"        ✓
//! "kiloan"  ──► category is kiloan            ✓
//! "16000"   ──► unit price text is "16000"    ✓
//! ""        ──► every product
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductCategory};

/// Products of one category, in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryGroup {
    pub category: ProductCategory,
    pub products: Vec<Product>,
}

/// Checks a single product against a search query.
///
/// The query is matched case-insensitively against the name, the category
/// name and the plain price digits.
pub fn matches_query(product: &Product, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&needle)
        || product.category.as_str().contains(&needle)
        || product.unit_price.rupiah().to_string().contains(&needle)
}

/// Filters products by a search query, keeping input order.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches_query(p, query))
        .cloned()
        .collect()
}

/// Groups products by category in literan, kiloan, karungan order.
///
/// Categories without products are left out.
pub fn group_by_category(products: &[Product]) -> Vec<CategoryGroup> {
    ProductCategory::ALL
        .iter()
        .map(|&category| CategoryGroup {
            category,
            products: products
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
        })
        .filter(|group| !group.products.is_empty())
        .collect()
}

/// Products at or below the low-stock threshold.
pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_low_stock()).cloned().collect()
}

/// Products at or below a custom threshold (from shop configuration).
pub fn low_stock_at(products: &[Product], threshold: Decimal) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.stock <= threshold)
        .cloned()
        .collect()
}
