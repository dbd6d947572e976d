//! Connection bootstrap for a MongoDB-backed robot data warehouse.
//!
//! This library resolves connection settings from a parameter source
//! (explicit override, else configured parameter, else hard default),
//! establishes a verified connection under a wall-clock deadline with
//! retries and cooperative cancellation, and provides convenience
//! operations on top of the established client.
//!
//! # Connecting
//!
//! ```ignore
//! use core_params::EnvParams;
//! use warehouse::{ConnectionOverrides, connect_from_params};
//!
//! let overrides = ConnectionOverrides::new().with_host("db.example.org");
//! let client = connect_from_params(&EnvParams::new(), &overrides).await?;
//! let db = client.database("robot_logs");
//! ```
//!
//! # Cancellation
//!
//! ```ignore
//! use tokio_util::sync::CancellationToken;
//! use warehouse::connect_with_cancel;
//!
//! let cancel = CancellationToken::new();
//! let client = connect_with_cancel(&settings, &cancel).await?;
//! // cancel.cancel() from a shutdown handler ends the retry loop early.
//! ```

pub mod admin;
pub mod common;
pub mod connector;
pub mod health;
pub mod metadata;
pub mod settings;

pub use common::{WarehouseError, WarehouseResult};
pub use connector::{
    connect, connect_from_params, connect_from_params_with_cancel, connect_with_cancel,
};
pub use settings::{ConnectionOverrides, ConnectionSettings};

// Re-exports for convenience: the driver types callers hold after bootstrap,
// and the cancellation token the connector accepts.
pub use mongodb::{Client, Collection, Database};
pub use tokio_util::sync::CancellationToken;
