//! Evaluation results
//!
//! These carry full-precision decimals. Use [`MenuEvaluation::to_report`]
//! for the rounded presentation view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{MenuStatus, Unit};

use super::error::CostingError;
use super::money::round_money;

/// Why an ingredient could not be costed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngredientIssue {
    /// Ingredient unit and product stock unit are in different categories
    IncompatibleUnits { from: Unit, to: Unit },
    /// Referenced product no longer exists
    ProductNotFound { product_id: String },
    /// A quantity or cost left the representable range
    Overflow { field: String },
}

impl From<CostingError> for IngredientIssue {
    fn from(err: CostingError) -> Self {
        match err {
            CostingError::IncompatibleUnits { from, to } => {
                IngredientIssue::IncompatibleUnits { from, to }
            }
            CostingError::Overflow(field) => IngredientIssue::Overflow {
                field: field.to_string(),
            },
        }
    }
}

/// Computed fields for one menu ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEvaluation {
    /// Index in the menu's ingredient list
    pub position: usize,
    pub product_id: String,
    pub product_name: Option<String>,
    pub required_quantity: Decimal,
    pub unit: Unit,
    pub stock_unit: Option<Unit>,
    /// Required quantity expressed in the product's stock unit
    pub converted_quantity: Option<Decimal>,
    pub ingredient_cost: Option<Decimal>,
    pub stock_quantity: Option<Decimal>,
    pub stock_sufficient: bool,
    pub missing_quantity: Option<Decimal>,
    pub issue: Option<IngredientIssue>,
    pub note: Option<String>,
}

impl IngredientEvaluation {
    pub fn is_resolved(&self) -> bool {
        self.issue.is_none()
    }

    /// Mark as unresolved: no cost, insufficient, shortfall unknown
    pub fn unresolve(&mut self, issue: IngredientIssue) {
        self.converted_quantity = None;
        self.ingredient_cost = None;
        self.missing_quantity = None;
        self.stock_sufficient = false;
        self.issue = Some(issue);
    }
}

/// Menu-level aggregates plus the per-ingredient breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEvaluation {
    pub menu_id: String,
    pub menu_name: String,
    pub status: MenuStatus,
    pub sale_price: Decimal,
    /// Sum over resolved ingredients only
    pub total_ingredient_cost: Decimal,
    pub margin: Decimal,
    pub margin_percentage: Option<Decimal>,
    pub preparable: bool,
    pub missing_ingredient_count: usize,
    pub unresolved_ingredient_count: usize,
    pub ingredients: Vec<IngredientEvaluation>,
}

impl MenuEvaluation {
    /// Ingredients that are short or could not be resolved
    pub fn missing_ingredients(&self) -> impl Iterator<Item = &IngredientEvaluation> {
        self.ingredients.iter().filter(|i| !i.stock_sufficient)
    }

    pub fn has_negative_margin(&self) -> bool {
        self.margin < Decimal::ZERO
    }

    /// Rounded presentation view
    pub fn to_report(&self) -> MenuCostReport {
        MenuCostReport {
            menu_id: self.menu_id.clone(),
            menu_name: self.menu_name.clone(),
            status: self.status,
            sale_price: round_money(self.sale_price),
            total_ingredient_cost: round_money(self.total_ingredient_cost),
            margin: round_money(self.margin),
            margin_percentage: self.margin_percentage.map(round_money),
            preparable: self.preparable,
            missing_ingredient_count: self.missing_ingredient_count,
            unresolved_ingredient_count: self.unresolved_ingredient_count,
            ingredients: self
                .ingredients
                .iter()
                .map(|i| IngredientCostReport {
                    position: i.position,
                    product_id: i.product_id.clone(),
                    product_name: i.product_name.clone(),
                    required_quantity: i.required_quantity,
                    unit: i.unit,
                    converted_quantity: i.converted_quantity,
                    stock_unit: i.stock_unit,
                    ingredient_cost: i.ingredient_cost.map(round_money),
                    stock_sufficient: i.stock_sufficient,
                    missing_quantity: i.missing_quantity,
                    issue: i.issue.clone(),
                })
                .collect(),
        }
    }
}

/// Presentation view of one ingredient (money rounded to 2dp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCostReport {
    pub position: usize,
    pub product_id: String,
    pub product_name: Option<String>,
    pub required_quantity: Decimal,
    pub unit: Unit,
    pub converted_quantity: Option<Decimal>,
    pub stock_unit: Option<Unit>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub ingredient_cost: Option<Decimal>,
    pub stock_sufficient: bool,
    pub missing_quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IngredientIssue>,
}

/// Presentation view of a menu evaluation (money and percentage rounded to 2dp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCostReport {
    pub menu_id: String,
    pub menu_name: String,
    pub status: MenuStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_ingredient_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub margin_percentage: Option<Decimal>,
    pub preparable: bool,
    pub missing_ingredient_count: usize,
    pub unresolved_ingredient_count: usize,
    pub ingredients: Vec<IngredientCostReport>,
}
