//! Data models
//!
//! Shared between the costing engine and any reporting surface.
//! All IDs use the `"table:id"` string convention (`product:flour`, `menu:...`).
//! Quantities and money are `rust_decimal::Decimal`, serialized as strings.

pub mod menu;
pub mod product;
pub mod unit;

// Re-exports
pub use menu::*;
pub use product::*;
pub use unit::*;
