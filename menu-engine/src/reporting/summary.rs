//! Inventory report
//!
//! Aggregates a batch of menu evaluations into counts, shortages and
//! low-stock alerts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Product, Unit};

use crate::costing::money::round_money;
use crate::costing::{MenuCostReport, MenuEvaluation, StockSnapshot};

/// Product short for one or more menus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub product_id: String,
    pub product_name: Option<String>,
    pub stock_unit: Option<Unit>,
    /// Largest shortfall over all affected menus, in stock unit
    pub max_missing_quantity: Option<Decimal>,
    pub menu_ids: Vec<String>,
    /// True when the product is missing or its unit cannot be converted
    pub unresolved: bool,
}

/// Product at or below its low stock threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub product_id: String,
    pub product_name: String,
    pub stock_quantity: Decimal,
    pub stock_unit: Unit,
    pub threshold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub menu_count: usize,
    pub preparable_count: usize,
    pub not_preparable_count: usize,
    pub negative_margin_count: usize,
    pub average_margin_percentage: Option<Decimal>,
    /// Sorted by product id
    pub shortages: Vec<Shortage>,
    /// Sorted by product id
    pub low_stock: Vec<LowStockAlert>,
}

impl InventoryReport {
    /// Presentation view with rounded menu figures
    pub fn to_view(&self, evaluations: &[MenuEvaluation]) -> InventoryReportView {
        InventoryReportView {
            menu_count: self.menu_count,
            preparable_count: self.preparable_count,
            not_preparable_count: self.not_preparable_count,
            negative_margin_count: self.negative_margin_count,
            average_margin_percentage: self.average_margin_percentage.map(round_money),
            shortages: self.shortages.clone(),
            low_stock: self.low_stock.clone(),
            menus: evaluations.iter().map(MenuEvaluation::to_report).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReportView {
    pub menu_count: usize,
    pub preparable_count: usize,
    pub not_preparable_count: usize,
    pub negative_margin_count: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_margin_percentage: Option<Decimal>,
    pub shortages: Vec<Shortage>,
    pub low_stock: Vec<LowStockAlert>,
    pub menus: Vec<MenuCostReport>,
}

/// Build the report
///
/// `snapshot` should hold every product of interest for the low stock scan;
/// products not in it are simply not checked.
pub fn summarize(
    evaluations: &[MenuEvaluation],
    snapshot: &StockSnapshot,
    default_low_stock_threshold: Decimal,
) -> InventoryReport {
    let preparable_count = evaluations.iter().filter(|e| e.preparable).count();
    let negative_margin_count = evaluations.iter().filter(|e| e.has_negative_margin()).count();

    let percentages: Vec<Decimal> = evaluations
        .iter()
        .filter_map(|e| e.margin_percentage)
        .collect();
    // None when empty or when the sum leaves the Decimal range
    let average_margin_percentage = if percentages.is_empty() {
        None
    } else {
        percentages
            .iter()
            .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(*p))
            .and_then(|sum| sum.checked_div(Decimal::from(percentages.len())))
    };

    let mut shortages: BTreeMap<String, Shortage> = BTreeMap::new();
    for evaluation in evaluations {
        for ingredient in evaluation.missing_ingredients() {
            let entry = shortages
                .entry(ingredient.product_id.clone())
                .or_insert_with(|| Shortage {
                    product_id: ingredient.product_id.clone(),
                    product_name: ingredient.product_name.clone(),
                    stock_unit: ingredient.stock_unit,
                    max_missing_quantity: None,
                    menu_ids: Vec::new(),
                    unresolved: false,
                });

            if !entry.menu_ids.contains(&evaluation.menu_id) {
                entry.menu_ids.push(evaluation.menu_id.clone());
            }
            if !ingredient.is_resolved() {
                entry.unresolved = true;
            }
            if let Some(missing) = ingredient.missing_quantity {
                entry.max_missing_quantity = Some(match entry.max_missing_quantity {
                    Some(current) => current.max(missing),
                    None => missing,
                });
            }
        }
    }

    let mut low_stock: Vec<LowStockAlert> = snapshot
        .products()
        .filter(|p| p.is_active && p.is_low_stock(default_low_stock_threshold))
        .map(|p: &Product| LowStockAlert {
            product_id: p.id.clone(),
            product_name: p.name.clone(),
            stock_quantity: p.stock_quantity,
            stock_unit: p.stock_unit,
            threshold: p.low_stock_threshold.unwrap_or(default_low_stock_threshold),
        })
        .collect();
    low_stock.sort_by(|a, b| a.product_id.cmp(&b.product_id));

    InventoryReport {
        menu_count: evaluations.len(),
        preparable_count,
        not_preparable_count: evaluations.len() - preparable_count,
        negative_margin_count,
        average_margin_percentage,
        shortages: shortages.into_values().collect(),
        low_stock,
    }
}
