//! Costing errors

use shared::error::{AppError, ErrorCode};
use shared::models::Unit;
use thiserror::Error;

/// Errors raised by the costing arithmetic
///
/// During menu evaluation these are recovered per ingredient and surface as
/// [`IngredientIssue`](super::IngredientIssue). A strict single-ingredient
/// check turns them into an [`AppError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostingError {
    #[error("Incompatible units: cannot convert {from} to {to}")]
    IncompatibleUnits { from: Unit, to: Unit },

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl From<CostingError> for AppError {
    fn from(err: CostingError) -> Self {
        match err {
            CostingError::IncompatibleUnits { from, to } => {
                AppError::with_message(ErrorCode::IncompatibleUnits, err.to_string())
                    .with_detail("from", from.symbol())
                    .with_detail("to", to.symbol())
            }
            CostingError::Overflow(what) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
                    .with_detail("field", what)
            }
        }
    }
}

pub type CostingResult<T> = Result<T, CostingError>;
