//! Services
//!
//! - [`CostingService`] - menu evaluation against live inventory

pub mod costing_service;

pub use costing_service::CostingService;
