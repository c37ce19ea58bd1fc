//! Unit conversion
//!
//! `quantity × factor(from) / factor(to)`, multiplying before dividing so that
//! conversions between decimal units (g ↔ kg, ml ↔ l) stay exact.

use rust_decimal::Decimal;
use shared::models::Unit;

use super::error::{CostingError, CostingResult};

/// Convert `quantity` expressed in `from` into `to`
///
/// Fails with [`CostingError::IncompatibleUnits`] when the units belong to
/// different physical categories. Never coerces. A result outside the
/// `Decimal` range fails with [`CostingError::Overflow`].
pub fn convert(quantity: Decimal, from: Unit, to: Unit) -> CostingResult<Decimal> {
    if from == to {
        return Ok(quantity);
    }
    if !from.is_compatible_with(to) {
        return Err(CostingError::IncompatibleUnits { from, to });
    }
    quantity
        .checked_mul(from.factor())
        .and_then(|base| base.checked_div(to.factor()))
        .ok_or(CostingError::Overflow("converted_quantity"))
}
