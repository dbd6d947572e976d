use std::time::Duration;

use core_params::ParamError;

/// Unified error type for all warehouse operations
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    /// No verified connection before the deadline (or the caller cancelled)
    #[error("Gave up connecting to {address} after {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    /// The server rejected the configured credentials. Not retried.
    #[error("Authentication failed for user '{user}': {message}")]
    AuthFailed { user: String, message: String },

    /// No metadata entry for the named message collection
    #[error("No message collection named '{collection}' in database '{database}'")]
    CollectionNotFound { database: String, collection: String },

    /// Metadata entry exists but carries no type string
    #[error("Metadata entry for '{collection}' has no type string")]
    MissingMessageType { collection: String },

    /// Parameter resolution error
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    /// MongoDB driver error
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Result type alias for warehouse operations
pub type WarehouseResult<T> = Result<T, WarehouseError>;
