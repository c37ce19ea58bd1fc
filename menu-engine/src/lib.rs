//! Menu Engine - menu costing and feasibility
//!
//! # Architecture
//!
//! - **Costing** (`costing`): unit conversion, ingredient and menu evaluation (pure)
//! - **Inventory** (`inventory`): product/menu collaborator traits and in-memory stores
//! - **Services** (`services`): load menu → one batched product fetch → evaluate
//! - **Reporting** (`reporting`): batch summary, shortages and low stock
//!
//! # Layout
//!
//! ```text
//! menu-engine/src/
//! ├── core/          # configuration
//! ├── costing/       # costing engine
//! ├── inventory/     # collaborators
//! ├── services/      # CostingService
//! ├── reporting/     # summary report
//! └── utils/         # validation, logger
//! ```

pub mod core;
pub mod costing;
pub mod inventory;
pub mod reporting;
pub mod services;
pub mod utils;

pub use crate::core::Config;
pub use costing::{CostingError, MenuEvaluation, StockSnapshot, convert, evaluate};
pub use inventory::{Catalog, InMemoryInventory, InMemoryMenuStore, InventoryProvider, MenuStore};
pub use reporting::{InventoryReport, summarize};
pub use services::CostingService;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the environment (dotenv, logger)
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // .env is optional
        eprintln!("No .env file loaded: {}", e);
    }
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
