//! Menu Model

use super::unit::Unit;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu lifecycle status, managed independently of costing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// A quantity of one product required by a menu
///
/// Computed fields (converted quantity, cost, sufficiency) are produced on
/// every evaluation and are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuIngredient {
    /// Product reference ("product:xxx")
    pub product_id: String,
    pub quantity: Decimal,
    pub unit: Unit,
    #[serde(default)]
    pub note: Option<String>,
}

impl MenuIngredient {
    pub fn new(product_id: impl Into<String>, quantity: Decimal, unit: Unit) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit,
            note: None,
        }
    }
}

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// "menu:xxx"
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub service_date: NaiveDate,
    pub sale_price: Decimal,
    #[serde(default)]
    pub status: MenuStatus,
    /// Ordered ingredient list (order is kept for reporting)
    #[serde(default)]
    pub ingredients: Vec<MenuIngredient>,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

impl Menu {
    /// Distinct product ids referenced by this menu, in first-seen order
    pub fn product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.ingredients.len());
        for ingredient in &self.ingredients {
            if !ids.contains(&ingredient.product_id) {
                ids.push(ingredient.product_id.clone());
            }
        }
        ids
    }
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub description: Option<String>,
    pub service_date: NaiveDate,
    pub sale_price: Decimal,
    #[serde(default)]
    pub ingredients: Vec<MenuIngredient>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sale_price: Option<Decimal>,
    pub ingredients: Option<Vec<MenuIngredient>>,
}
