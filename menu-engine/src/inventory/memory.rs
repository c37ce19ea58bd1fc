//! In-memory inventory and menu store
//!
//! Products and menus live in `RwLock<HashMap>` caches. Reads hand out
//! clones, so an evaluation works on a snapshot that later writes cannot
//! touch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, MenuCreate, MenuStatus, MenuUpdate, Product, ProductUpdate};
use shared::util::{new_id, now_millis};

use super::provider::{InventoryProvider, InventoryResult, MenuStore};
use crate::utils::validation::{
    validate_menu_create, validate_menu_update, validate_product, validate_stock_bound,
};

// =============================================================================
// InMemoryInventory
// =============================================================================

/// Product stock keyed by "product:xxx"
#[derive(Clone, Default)]
pub struct InMemoryInventory {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl std::fmt::Debug for InMemoryInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryInventory")
            .field("products_count", &self.products.read().len())
            .finish()
    }
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a product list, validating every entry
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> AppResult<Self> {
        let inventory = Self::new();
        for product in products {
            inventory.upsert_product(product)?;
        }
        Ok(inventory)
    }

    pub fn upsert_product(&self, product: Product) -> AppResult<()> {
        validate_product(&product)?;
        tracing::debug!(product_id = %product.id, "Product stored");
        self.products.write().insert(product.id.clone(), product);
        Ok(())
    }

    pub fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        let mut products = self.products.write();
        let current = products
            .get(id)
            .ok_or_else(|| AppError::product_not_found(id))?;

        let mut updated = current.clone();
        if let Some(name) = data.name {
            updated.name = name;
        }
        if let Some(cost) = data.unit_cost {
            updated.unit_cost = cost;
        }
        if let Some(stock) = data.stock_quantity {
            updated.stock_quantity = stock;
        }
        if let Some(threshold) = data.low_stock_threshold {
            updated.low_stock_threshold = Some(threshold);
        }
        if let Some(active) = data.is_active {
            updated.is_active = active;
        }
        validate_product(&updated)?;

        products.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Remove a product; menus that reference it keep the dangling id
    pub fn remove_product(&self, id: &str) -> AppResult<Product> {
        let removed = self
            .products
            .write()
            .remove(id)
            .ok_or_else(|| AppError::product_not_found(id))?;
        tracing::info!(product_id = %id, "Product removed");
        Ok(removed)
    }

    /// Add `delta` (may be negative) to a product's stock
    ///
    /// Rejects adjustments that would leave stock below zero.
    pub fn adjust_stock(&self, id: &str, delta: Decimal) -> AppResult<Decimal> {
        let mut products = self.products.write();
        let product = products
            .get_mut(id)
            .ok_or_else(|| AppError::product_not_found(id))?;

        let next = product
            .stock_quantity
            .checked_add(delta)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("Stock adjustment {} out of range for {}", delta, id),
                )
            })?;
        validate_stock_bound(next, "stock_quantity")
            .map_err(|e| e.with_detail("product_id", id.to_string()))?;
        if next < Decimal::ZERO {
            return Err(AppError::with_message(
                ErrorCode::ProductOutOfStock,
                format!(
                    "Insufficient stock for {}: have {}, adjustment {}",
                    id, product.stock_quantity, delta
                ),
            )
            .with_detail("product_id", id.to_string()));
        }
        product.stock_quantity = next;
        tracing::debug!(product_id = %id, delta = %delta, stock = %next, "Stock adjusted");
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

#[async_trait]
impl InventoryProvider for InMemoryInventory {
    async fn fetch_products(&self, ids: &[String]) -> InventoryResult<Vec<Product>> {
        let products = self.products.read();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn get_product(&self, id: &str) -> InventoryResult<Option<Product>> {
        Ok(self.products.read().get(id).cloned())
    }

    async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }
}

// =============================================================================
// InMemoryMenuStore
// =============================================================================

/// Menus keyed by "menu:xxx"
#[derive(Clone, Default)]
pub struct InMemoryMenuStore {
    menus: Arc<RwLock<HashMap<String, Menu>>>,
}

impl std::fmt::Debug for InMemoryMenuStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMenuStore")
            .field("menus_count", &self.menus.read().len())
            .finish()
    }
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load already-persisted menus without creation checks
    ///
    /// Stored menus may have a past service date.
    pub fn with_menus(menus: impl IntoIterator<Item = Menu>) -> AppResult<Self> {
        let store = Self::new();
        {
            let mut map = store.menus.write();
            for menu in menus {
                if map.contains_key(&menu.id) {
                    return Err(AppError::already_exists(menu.id));
                }
                map.insert(menu.id.clone(), menu);
            }
        }
        Ok(store)
    }

    /// Create a menu; `today` is the business date used for the service date check
    pub fn create_menu(&self, data: MenuCreate, today: NaiveDate) -> AppResult<Menu> {
        validate_menu_create(&data, today)?;

        let menu = Menu {
            id: new_id("menu"),
            name: data.name,
            description: data.description,
            service_date: data.service_date,
            sale_price: data.sale_price,
            status: MenuStatus::Draft,
            ingredients: data.ingredients,
            created_at: now_millis(),
        };
        tracing::info!(menu_id = %menu.id, name = %menu.name, "Menu created");
        self.menus.write().insert(menu.id.clone(), menu.clone());
        Ok(menu)
    }

    pub fn update_menu(&self, id: &str, data: MenuUpdate) -> AppResult<Menu> {
        validate_menu_update(&data)?;

        let mut menus = self.menus.write();
        let menu = menus.get_mut(id).ok_or_else(|| AppError::menu_not_found(id))?;
        if menu.status == MenuStatus::Archived {
            return Err(AppError::with_message(
                ErrorCode::MenuArchived,
                format!("Menu {} is archived", id),
            ));
        }

        if let Some(name) = data.name {
            menu.name = name;
        }
        if let Some(description) = data.description {
            menu.description = Some(description);
        }
        if let Some(price) = data.sale_price {
            menu.sale_price = price;
        }
        if let Some(ingredients) = data.ingredients {
            menu.ingredients = ingredients;
        }
        Ok(menu.clone())
    }

    pub fn set_status(&self, id: &str, status: MenuStatus) -> AppResult<Menu> {
        let mut menus = self.menus.write();
        let menu = menus.get_mut(id).ok_or_else(|| AppError::menu_not_found(id))?;
        tracing::info!(menu_id = %id, from = ?menu.status, to = ?status, "Menu status changed");
        menu.status = status;
        Ok(menu.clone())
    }

    pub fn delete_menu(&self, id: &str) -> AppResult<Menu> {
        self.menus
            .write()
            .remove(id)
            .ok_or_else(|| AppError::menu_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.menus.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.read().is_empty()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn get_menu_with_ingredients(&self, id: &str) -> InventoryResult<Option<Menu>> {
        Ok(self.menus.read().get(id).cloned())
    }

    async fn list_menus(&self) -> InventoryResult<Vec<Menu>> {
        let mut menus: Vec<Menu> = self.menus.read().values().cloned().collect();
        menus.sort_by(|a, b| {
            a.service_date
                .cmp(&b.service_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(menus)
    }
}
