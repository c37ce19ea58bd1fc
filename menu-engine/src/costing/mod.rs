//! Menu Costing Engine
//!
//! Converts ingredient quantities into stock units, costs them, checks stock
//! sufficiency, and aggregates menu totals, margin and preparability.
//!
//! Everything in this module is synchronous and free of I/O.

mod error;
mod evaluator;
pub mod money;
mod snapshot;
mod types;
pub mod units;

pub use error::*;
pub use evaluator::*;
pub use snapshot::*;
pub use types::*;
pub use units::convert;
