//! # Catalog Config
//!
//! Configuration management for the product catalog service.
//! Supports layered configuration from files and environment variables,
//! plus runtime reload.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
