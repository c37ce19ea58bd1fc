//! Product Model
//!
//! Inventory items as seen by the menu costing engine. Owned by the
//! inventory side; the engine only reads them.

use super::unit::Unit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// "product:xxx"
    pub id: String,
    pub name: String,
    /// Cost of one `stock_unit`
    pub unit_cost: Decimal,
    /// Current stock, expressed in `stock_unit`
    pub stock_quantity: Decimal,
    pub stock_unit: Unit,
    /// Per-product low stock alert level (falls back to the configured default)
    #[serde(default)]
    pub low_stock_threshold: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_cost: Decimal,
        stock_quantity: Decimal,
        stock_unit: Unit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_cost,
            stock_quantity,
            stock_unit,
            low_stock_threshold: None,
            is_active: true,
        }
    }

    pub fn is_low_stock(&self, default_threshold: Decimal) -> bool {
        let threshold = self.low_stock_threshold.unwrap_or(default_threshold);
        self.stock_quantity <= threshold
    }
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub stock_quantity: Option<Decimal>,
    pub low_stock_threshold: Option<Decimal>,
    pub is_active: Option<bool>,
}
