//! Aggregate reporting over a batch of menu evaluations

mod summary;

pub use summary::{InventoryReport, InventoryReportView, LowStockAlert, Shortage, summarize};
