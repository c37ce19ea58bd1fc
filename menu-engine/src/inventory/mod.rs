//! Inventory collaborators
//!
//! - [`InventoryProvider`] / [`MenuStore`] - traits the costing service reads through
//! - [`InMemoryInventory`] / [`InMemoryMenuStore`] - lock-guarded in-memory implementations
//! - [`Catalog`] - JSON seed file for the in-memory stores

mod catalog;
mod memory;
mod provider;

pub use catalog::Catalog;
pub use memory::{InMemoryInventory, InMemoryMenuStore};
pub use provider::{InventoryError, InventoryProvider, InventoryResult, MenuStore};

use shared::error::AppError;

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Unavailable(msg) => AppError::storage(msg),
        }
    }
}
