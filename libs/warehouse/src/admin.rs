//! Database administration helpers.

use std::time::Duration;

use core_params::ParamSource;
use tracing::info;

use crate::common::WarehouseResult;
use crate::connector::connect_from_params;
use crate::settings::ConnectionOverrides;

/// Connection budget for the short-form [`drop_database`].
pub const DROP_TIMEOUT: Duration = Duration::from_secs(60);

/// Drop the named database, connecting with configured defaults and a
/// [`DROP_TIMEOUT`] budget.
///
/// Propagates [`crate::WarehouseError::ConnectTimeout`] when no connection
/// is made in time.
pub async fn drop_database<P: ParamSource>(params: &P, name: &str) -> WarehouseResult<()> {
    let overrides = ConnectionOverrides::new().with_timeout(DROP_TIMEOUT);
    drop_database_at(params, name, &overrides).await
}

/// Drop the named database on an explicitly addressed server.
pub async fn drop_database_at<P: ParamSource>(
    params: &P,
    name: &str,
    overrides: &ConnectionOverrides,
) -> WarehouseResult<()> {
    let client = connect_from_params(params, overrides).await?;
    client.database(name).drop().await?;

    info!(database = name, "Dropped warehouse database");
    Ok(())
}
