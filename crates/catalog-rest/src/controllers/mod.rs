//! REST API controllers.

pub mod component_controller;
pub mod health_controller;
pub mod manufacturer_controller;
pub mod metrics_controller;
pub mod product_controller;

pub use health_controller::*;
