//! Stock snapshot
//!
//! An immutable view of product stock captured once per evaluation.
//! Stock changes made after the snapshot is taken do not affect it.

use std::collections::HashMap;

use shared::models::Product;

#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    products: HashMap<String, Product>,
}

impl StockSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
