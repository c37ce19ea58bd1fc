//! Core - configuration
//!
//! - [`Config`] - report configuration

pub mod config;

pub use config::Config;
