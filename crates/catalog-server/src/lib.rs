//! # Catalog Server Library
//!
//! Dependency injection wiring, logging and metrics setup for the catalog
//! server binary.

pub mod app;
pub mod di;
pub mod startup;
