//! Costing Service
//!
//! Wires the collaborators to the pure costing engine:
//! load menu → check preconditions → one batched product fetch → evaluate.

use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, MenuIngredient, MenuStatus};

use crate::costing::{self, CostingError, IngredientEvaluation, MenuEvaluation, StockSnapshot};
use crate::inventory::{InventoryProvider, MenuStore};
use crate::utils::validation::{validate_ingredient, validate_menu_for_evaluation};

/// Evaluates menus against live inventory
///
/// Results are informational. A preparable menu holds no reservation on
/// stock; a concurrent write may consume it right after evaluation.
pub struct CostingService<I, M> {
    inventory: Arc<I>,
    menus: Arc<M>,
}

impl<I, M> Clone for CostingService<I, M> {
    fn clone(&self) -> Self {
        Self {
            inventory: Arc::clone(&self.inventory),
            menus: Arc::clone(&self.menus),
        }
    }
}

impl<I, M> std::fmt::Debug for CostingService<I, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostingService")
            .field("inventory", &"<InventoryProvider>")
            .field("menus", &"<MenuStore>")
            .finish()
    }
}

impl<I, M> CostingService<I, M>
where
    I: InventoryProvider,
    M: MenuStore,
{
    pub fn new(inventory: Arc<I>, menus: Arc<M>) -> Self {
        Self { inventory, menus }
    }

    /// Fetch every product the menu references in a single call
    pub async fn snapshot_for(&self, menu: &Menu) -> AppResult<StockSnapshot> {
        let ids = menu.product_ids();
        if ids.is_empty() {
            return Ok(StockSnapshot::new());
        }
        let products = self.inventory.fetch_products(&ids).await?;
        Ok(StockSnapshot::from_products(products))
    }

    /// Evaluate an already-loaded menu
    pub async fn evaluate(&self, menu: &Menu) -> AppResult<MenuEvaluation> {
        validate_menu_for_evaluation(menu)?;
        let snapshot = self.snapshot_for(menu).await?;
        let evaluation = costing::evaluate(menu, &snapshot);

        if evaluation.unresolved_ingredient_count > 0 {
            tracing::warn!(
                menu_id = %menu.id,
                unresolved = evaluation.unresolved_ingredient_count,
                "Menu has unresolved ingredients"
            );
        }
        Ok(evaluation)
    }

    /// Load a menu by id and evaluate it
    ///
    /// A missing menu fails the whole call with `MenuNotFound`.
    pub async fn evaluate_menu(&self, menu_id: &str) -> AppResult<MenuEvaluation> {
        let menu = self
            .menus
            .get_menu_with_ingredients(menu_id)
            .await?
            .ok_or_else(|| AppError::menu_not_found(menu_id))?;
        self.evaluate(&menu).await
    }

    /// Strict single-ingredient check, used when an ingredient line is edited
    ///
    /// Unlike menu evaluation, a missing product, an incompatible unit or an
    /// out-of-range cost fails the call with its own error code.
    pub async fn check_ingredient(
        &self,
        ingredient: &MenuIngredient,
    ) -> AppResult<IngredientEvaluation> {
        validate_ingredient(0, ingredient)?;
        let product = self
            .inventory
            .get_product(&ingredient.product_id)
            .await?
            .ok_or_else(|| AppError::product_not_found(&ingredient.product_id))?;

        let converted = costing::convert(ingredient.quantity, ingredient.unit, product.stock_unit)?;
        converted
            .checked_mul(product.unit_cost)
            .ok_or(CostingError::Overflow("ingredient_cost"))?;

        Ok(costing::evaluate_ingredient(0, ingredient, Some(&product)))
    }

    /// Evaluate every non-archived menu
    ///
    /// Menus failing preconditions are logged and skipped so one bad record
    /// does not hide the rest of the report.
    pub async fn evaluate_all(&self) -> AppResult<Vec<MenuEvaluation>> {
        let menus = self.menus.list_menus().await?;
        let mut results = Vec::with_capacity(menus.len());
        for menu in menus.iter().filter(|m| m.status != MenuStatus::Archived) {
            match self.evaluate(menu).await {
                Ok(evaluation) => results.push(evaluation),
                Err(e) if e.code.category() == shared::ErrorCategory::System => return Err(e),
                Err(e) => {
                    tracing::warn!(menu_id = %menu.id, code = %e.code, error = %e, "Skipping menu");
                }
            }
        }
        tracing::info!(evaluated = results.len(), total = menus.len(), "Menus evaluated");
        Ok(results)
    }

    /// Check run before a "mark as preparing" transition
    ///
    /// Fails with `MenuNotPreparable` listing the short products. Does not
    /// touch the menu's status.
    pub async fn ensure_preparable(&self, menu_id: &str) -> AppResult<MenuEvaluation> {
        let evaluation = self.evaluate_menu(menu_id).await?;
        if evaluation.preparable {
            return Ok(evaluation);
        }

        if evaluation.ingredients.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::MenuEmpty,
                format!("Menu {} has no ingredients", menu_id),
            )
            .with_detail("menu_id", menu_id.to_string()));
        }

        let missing: Vec<String> = evaluation
            .missing_ingredients()
            .map(|i| i.product_id.clone())
            .collect();
        Err(AppError::with_message(
            ErrorCode::MenuNotPreparable,
            format!(
                "Menu {} cannot be prepared: {} ingredient(s) short",
                menu_id,
                missing.len()
            ),
        )
        .with_detail("menu_id", menu_id.to_string())
        .with_detail("missing_products", missing))
    }
}
