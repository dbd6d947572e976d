//! Common types shared across the warehouse operations

pub mod error;

pub use error::{WarehouseError, WarehouseResult};
