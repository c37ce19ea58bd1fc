//! Catalog file
//!
//! JSON document with the products and menus used to seed the in-memory
//! stores:
//!
//! ```json
//! {
//!   "products": [{ "id": "product:flour", "name": "Flour", "unit_cost": "0.002",
//!                  "stock_quantity": "5000", "stock_unit": "gram" }],
//!   "menus": [{ "id": "menu:crepes", "name": "Crepes", "service_date": "2026-11-01",
//!               "sale_price": "9.50", "status": "ACTIVE",
//!               "ingredients": [{ "product_id": "product:flour", "quantity": "0.25", "unit": "kilogram" }] }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, Product};

use super::memory::{InMemoryInventory, InMemoryMenuStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub menus: Vec<Menu>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_message(
                ErrorCode::NotFound,
                format!("Failed to read catalog {}: {}", path.display(), e),
            )
            .with_detail("path", path.display().to_string())
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            menus = catalog.menus.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid catalog: {}", e))
        })
    }

    /// Split into the two in-memory collaborators
    pub fn into_stores(self) -> AppResult<(InMemoryInventory, InMemoryMenuStore)> {
        let inventory = InMemoryInventory::with_products(self.products)?;
        let menus = InMemoryMenuStore::with_menus(self.menus)?;
        Ok((inventory, menus))
    }
}
