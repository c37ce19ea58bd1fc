//! Input validation helpers
//!
//! Explicit precondition checks run before anything reaches the costing
//! engine. Text limits:
//! - Names: menus, products
//! - Notes and descriptions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Menu, MenuCreate, MenuIngredient, MenuUpdate, Product};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu, product
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

// ── Numeric bounds ──────────────────────────────────────────────────
//
// Keep every product of the costing arithmetic far inside the `Decimal`
// range: 1e6 kg in mg is 1e12, times a 1e6 unit cost is 1e18.

/// Maximum allowed sale price (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum ingredient quantity, in the ingredient's own unit
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum product unit cost (1,000,000 per stock unit)
pub const MAX_UNIT_COST: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum stock quantity and low stock threshold, in stock unit
pub const MAX_STOCK: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

// ── Text helpers ────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

// ── Numeric helpers ─────────────────────────────────────────────────

/// Sale price must be in (0, MAX_PRICE]
pub fn validate_sale_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::MenuInvalidPrice,
            format!("sale_price must be positive, got {price}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::MenuInvalidPrice,
            format!("sale_price exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    Ok(())
}

pub fn validate_ingredient(index: usize, ingredient: &MenuIngredient) -> Result<(), AppError> {
    validate_required_text(&ingredient.product_id, "product_id", MAX_NAME_LEN)?;
    if ingredient.quantity <= Decimal::ZERO {
        return Err(AppError::invalid_quantity(format!(
            "ingredient #{index} quantity must be positive, got {}",
            ingredient.quantity
        ))
        .with_detail("product_id", ingredient.product_id.clone()));
    }
    if ingredient.quantity > MAX_QUANTITY {
        return Err(out_of_range(format!(
            "ingredient #{index} quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            ingredient.quantity
        ))
        .with_detail("product_id", ingredient.product_id.clone()));
    }
    validate_optional_text(&ingredient.note, "note", MAX_NOTE_LEN)
}

pub fn validate_ingredients(ingredients: &[MenuIngredient]) -> Result<(), AppError> {
    ingredients
        .iter()
        .enumerate()
        .try_for_each(|(i, ingredient)| validate_ingredient(i, ingredient))
}

// ── Entity validation ───────────────────────────────────────────────

/// Service date must not be before `today`. Only checked at creation.
pub fn validate_service_date(date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if date < today {
        return Err(AppError::with_message(
            ErrorCode::MenuServiceDateInPast,
            format!("service_date {date} is in the past (today is {today})"),
        ));
    }
    Ok(())
}

pub fn validate_menu_create(data: &MenuCreate, today: NaiveDate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_sale_price(data.sale_price)?;
    validate_service_date(data.service_date, today)?;
    validate_ingredients(&data.ingredients)
}

pub fn validate_menu_update(data: &MenuUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = data.sale_price {
        validate_sale_price(price)?;
    }
    if let Some(ingredients) = &data.ingredients {
        validate_ingredients(ingredients)?;
    }
    Ok(())
}

/// Preconditions for evaluating a stored menu
///
/// The service date is deliberately not checked: past menus may still be
/// evaluated for reporting.
pub fn validate_menu_for_evaluation(menu: &Menu) -> Result<(), AppError> {
    validate_sale_price(menu.sale_price)?;
    validate_ingredients(&menu.ingredients)
}

pub fn validate_product(product: &Product) -> Result<(), AppError> {
    validate_required_text(&product.id, "id", MAX_NAME_LEN)?;
    validate_required_text(&product.name, "name", MAX_NAME_LEN)?;
    if product.unit_cost < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidCost,
            format!("unit_cost must be non-negative, got {}", product.unit_cost),
        )
        .with_detail("product_id", product.id.clone()));
    }
    if product.unit_cost > MAX_UNIT_COST {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidCost,
            format!(
                "unit_cost exceeds maximum allowed ({MAX_UNIT_COST}), got {}",
                product.unit_cost
            ),
        )
        .with_detail("product_id", product.id.clone()));
    }
    if product.stock_quantity < Decimal::ZERO {
        return Err(AppError::invalid_quantity(format!(
            "stock_quantity must be non-negative, got {}",
            product.stock_quantity
        ))
        .with_detail("product_id", product.id.clone()));
    }
    validate_stock_bound(product.stock_quantity, "stock_quantity")
        .map_err(|e| e.with_detail("product_id", product.id.clone()))?;
    if let Some(threshold) = product.low_stock_threshold {
        if threshold < Decimal::ZERO {
            return Err(AppError::invalid_quantity(format!(
                "low_stock_threshold must be non-negative, got {threshold}"
            )));
        }
        validate_stock_bound(threshold, "low_stock_threshold")?;
    }
    Ok(())
}

/// Stock figures must stay at or below [`MAX_STOCK`]
pub fn validate_stock_bound(value: Decimal, field: &str) -> Result<(), AppError> {
    if value > MAX_STOCK {
        return Err(out_of_range(format!(
            "{field} exceeds maximum allowed ({MAX_STOCK}), got {value}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

fn out_of_range(msg: String) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, msg)
}
