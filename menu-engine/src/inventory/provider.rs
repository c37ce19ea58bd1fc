//! Collaborator traits
//!
//! The costing engine reads products and menus through these traits. Real
//! deployments back them with a database; this crate ships in-memory versions.

use async_trait::async_trait;
use shared::models::{Menu, Product};
use thiserror::Error;

/// Collaborator failures
///
/// Absence is not an error: lookups return `Option` and batched fetches omit
/// unknown ids. Only a backing store that cannot answer fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Source of product stock
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Fetch all requested products in one call
    ///
    /// Ids with no matching product are omitted from the result rather than
    /// failing the call.
    async fn fetch_products(&self, ids: &[String]) -> InventoryResult<Vec<Product>>;

    async fn get_product(&self, id: &str) -> InventoryResult<Option<Product>>;

    async fn list_products(&self) -> InventoryResult<Vec<Product>>;
}

/// Source of menus with their ingredient lists
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn get_menu_with_ingredients(&self, id: &str) -> InventoryResult<Option<Menu>>;

    async fn list_menus(&self) -> InventoryResult<Vec<Menu>>;
}
