//! Shared types for the menu costing workspace
//!
//! Domain models (products, units, menus) and the unified error system
//! used by the costing engine and its callers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
