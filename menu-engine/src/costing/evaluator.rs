//! Ingredient and menu evaluation
//!
//! Pure functions over a menu and a [`StockSnapshot`]. No I/O happens here;
//! the snapshot is fetched by the caller in a single batched call.

use rust_decimal::Decimal;
use shared::models::{Menu, MenuIngredient, Product};

use super::error::CostingError;
use super::money::margin_percentage;
use super::snapshot::StockSnapshot;
use super::types::{IngredientEvaluation, IngredientIssue, MenuEvaluation};
use super::units::convert;

/// Evaluate one ingredient against its product's stock
///
/// A missing product or an incompatible unit does not fail: the ingredient is
/// reported as unresolved and insufficient, without a cost. Figures that leave
/// the `Decimal` range are reported the same way instead of panicking.
pub fn evaluate_ingredient(
    position: usize,
    ingredient: &MenuIngredient,
    product: Option<&Product>,
) -> IngredientEvaluation {
    let mut result = IngredientEvaluation {
        position,
        product_id: ingredient.product_id.clone(),
        product_name: None,
        required_quantity: ingredient.quantity,
        unit: ingredient.unit,
        stock_unit: None,
        converted_quantity: None,
        ingredient_cost: None,
        stock_quantity: None,
        stock_sufficient: false,
        missing_quantity: None,
        issue: None,
        note: ingredient.note.clone(),
    };

    let Some(product) = product else {
        tracing::warn!(
            product_id = %ingredient.product_id,
            position,
            "Ingredient references a missing product"
        );
        result.issue = Some(IngredientIssue::ProductNotFound {
            product_id: ingredient.product_id.clone(),
        });
        return result;
    };

    result.product_name = Some(product.name.clone());
    result.stock_unit = Some(product.stock_unit);
    result.stock_quantity = Some(product.stock_quantity);

    let costed = convert(ingredient.quantity, ingredient.unit, product.stock_unit).and_then(
        |converted| {
            converted
                .checked_mul(product.unit_cost)
                .map(|cost| (converted, cost))
                .ok_or(CostingError::Overflow("ingredient_cost"))
        },
    );
    let (converted, cost) = match costed {
        Ok(pair) => pair,
        Err(e) => {
            match &e {
                CostingError::IncompatibleUnits { from, to } => tracing::warn!(
                    product_id = %product.id,
                    from = %from,
                    to = %to,
                    "Ingredient unit incompatible with stock unit"
                ),
                CostingError::Overflow(field) => tracing::warn!(
                    product_id = %product.id,
                    field = *field,
                    "Ingredient quantity or cost out of range"
                ),
            }
            result.unresolve(e.into());
            return result;
        }
    };

    result.converted_quantity = Some(converted);
    result.ingredient_cost = Some(cost);
    result.stock_sufficient = product.stock_quantity >= converted;
    result.missing_quantity = Some(
        converted
            .saturating_sub(product.stock_quantity)
            .max(Decimal::ZERO),
    );
    result
}

/// Evaluate a menu against a stock snapshot
///
/// - Ingredient order is preserved.
/// - Costs are summed at full precision over resolved ingredients.
/// - An empty menu is never preparable.
/// - An ingredient whose cost would overflow the total is unresolved.
pub fn evaluate(menu: &Menu, snapshot: &StockSnapshot) -> MenuEvaluation {
    let mut ingredients: Vec<IngredientEvaluation> = menu
        .ingredients
        .iter()
        .enumerate()
        .map(|(position, ingredient)| {
            evaluate_ingredient(position, ingredient, snapshot.get(&ingredient.product_id))
        })
        .collect();

    let mut total_ingredient_cost = Decimal::ZERO;
    for ingredient in ingredients.iter_mut() {
        let Some(cost) = ingredient.ingredient_cost else {
            continue;
        };
        match total_ingredient_cost.checked_add(cost) {
            Some(total) => total_ingredient_cost = total,
            None => {
                tracing::warn!(
                    menu_id = %menu.id,
                    product_id = %ingredient.product_id,
                    "Menu total out of range, ingredient excluded"
                );
                ingredient.unresolve(CostingError::Overflow("total_ingredient_cost").into());
            }
        }
    }
    let margin = menu.sale_price.saturating_sub(total_ingredient_cost);
    let missing_ingredient_count = ingredients.iter().filter(|i| !i.stock_sufficient).count();
    let unresolved_ingredient_count = ingredients.iter().filter(|i| !i.is_resolved()).count();
    let preparable = !ingredients.is_empty() && missing_ingredient_count == 0;

    tracing::debug!(
        menu_id = %menu.id,
        ingredients = ingredients.len(),
        total_cost = %total_ingredient_cost,
        preparable,
        "Menu evaluated"
    );

    MenuEvaluation {
        menu_id: menu.id.clone(),
        menu_name: menu.name.clone(),
        status: menu.status,
        sale_price: menu.sale_price,
        total_ingredient_cost,
        margin,
        margin_percentage: margin_percentage(margin, menu.sale_price),
        preparable,
        missing_ingredient_count,
        unresolved_ingredient_count,
        ingredients,
    }
}
