//! Connection establishment with a wall-clock deadline, retry, and
//! cooperative cancellation.

use std::time::Duration;

use core_params::ParamSource;
use mongodb::{
    Client,
    bson::doc,
    options::{ClientOptions, Credential},
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::common::{WarehouseError, WarehouseResult};
use crate::settings::{ConnectionOverrides, ConnectionSettings};

/// Delay between failed connection attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on a single attempt's server selection. Attempts near the
/// deadline are clamped further so the loop never overruns its budget.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect to the warehouse database described by `settings`.
///
/// Retries until a verified connection is made or `settings.timeout`
/// elapses, sleeping [`RETRY_DELAY`] between attempts. A returned client has
/// answered a server ping; callers never receive a failed handle.
///
/// When `settings.authenticate` is set, credentials are validated as part of
/// the ping and a rejection fails immediately with
/// [`WarehouseError::AuthFailed`] rather than retrying.
pub async fn connect(settings: &ConnectionSettings) -> WarehouseResult<Client> {
    connect_with_cancel(settings, &CancellationToken::new()).await
}

/// Like [`connect`], with a cancellation token as a second stop condition.
///
/// The deadline and the token are independent cancellation sources; either
/// one ends the retry loop, and both surface as
/// [`WarehouseError::ConnectTimeout`].
pub async fn connect_with_cancel(
    settings: &ConnectionSettings,
    cancel: &CancellationToken,
) -> WarehouseResult<Client> {
    let address = settings.address();
    let deadline = Instant::now() + settings.timeout;

    info!(
        address = %address,
        database = %settings.database,
        authenticate = settings.authenticate,
        "Connecting to warehouse database (budget {:?})",
        settings.timeout
    );

    while !cancel.is_cancelled() && Instant::now() < deadline {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let attempt_timeout = remaining.min(ATTEMPT_TIMEOUT);

        let attempt = try_connect(settings, attempt_timeout);
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = attempt => result,
        };

        match result {
            Ok(client) => {
                info!("Connected to warehouse database at {}", address);
                return Ok(client);
            }
            Err(e) => {
                if let Some(message) = auth_failure(&e) {
                    error!(user = %settings.user, "Warehouse authentication failed: {}", message);
                    return Err(WarehouseError::AuthFailed {
                        user: settings.user.clone(),
                        message,
                    });
                }

                debug!(error = %e, "Connection attempt to {} failed, retrying in {:?}", address, RETRY_DELAY);

                let delay = RETRY_DELAY.min(deadline.saturating_duration_since(Instant::now()));
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    warn!(
        "Gave up connecting to {} after {:?}",
        address, settings.timeout
    );
    Err(WarehouseError::ConnectTimeout {
        address,
        timeout: settings.timeout,
    })
}

/// Resolve settings from `params` and `overrides`, then [`connect`].
pub async fn connect_from_params<P: ParamSource>(
    params: &P,
    overrides: &ConnectionOverrides,
) -> WarehouseResult<Client> {
    let settings = ConnectionSettings::resolve(params, overrides)?;
    connect(&settings).await
}

/// Resolve settings from `params` and `overrides`, then
/// [`connect_with_cancel`].
pub async fn connect_from_params_with_cancel<P: ParamSource>(
    params: &P,
    overrides: &ConnectionOverrides,
    cancel: &CancellationToken,
) -> WarehouseResult<Client> {
    let settings = ConnectionSettings::resolve(params, overrides)?;
    connect_with_cancel(&settings, cancel).await
}

/// One connection attempt: build a fresh client and prove the server is
/// reachable (and the credentials accepted) with a ping.
async fn try_connect(
    settings: &ConnectionSettings,
    attempt_timeout: Duration,
) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(format!("mongodb://{}", settings.address())).await?;

    options.app_name = Some("warehouse".to_string());
    options.connect_timeout = Some(attempt_timeout);
    options.server_selection_timeout = Some(attempt_timeout);

    if settings.authenticate {
        let mut credential = Credential::default();
        credential.username = Some(settings.user.clone());
        credential.password = Some(settings.password.clone());
        credential.source = Some(settings.database.clone());
        options.credential = Some(credential);
    }

    let client = Client::with_options(options)?;

    let ping_database = if settings.database.is_empty() {
        "admin"
    } else {
        &settings.database
    };
    client
        .database(ping_database)
        .run_command(doc! { "ping": 1 })
        .await?;

    Ok(client)
}

fn auth_failure(err: &mongodb::error::Error) -> Option<String> {
    match err.kind.as_ref() {
        mongodb::error::ErrorKind::Authentication { message, .. } => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant as StdInstant;

    fn unreachable_settings(timeout: Duration) -> ConnectionSettings {
        ConnectionSettings {
            host: "127.0.0.1".to_string(),
            // Reserved port, nothing listens here
            port: 1,
            timeout,
            ..ConnectionSettings::default()
        }
    }

    #[tokio::test]
    async fn test_connect_unreachable_times_out() {
        let settings = unreachable_settings(Duration::from_secs(2));

        let start = StdInstant::now();
        let result = connect(&settings).await;
        let elapsed = start.elapsed();

        assert!(matches!(
            result,
            Err(WarehouseError::ConnectTimeout { .. })
        ));
        // Roughly the configured budget, allowing one retry-sleep of slack
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_connect_zero_timeout_fails_without_attempt() {
        let settings = unreachable_settings(Duration::ZERO);

        let start = StdInstant::now();
        let result = connect(&settings).await;

        assert!(matches!(
            result,
            Err(WarehouseError::ConnectTimeout { .. })
        ));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_cancel_ends_retry_loop_early() {
        let settings = unreachable_settings(Duration::from_secs(30));
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            canceller.cancel();
        });

        let start = StdInstant::now();
        let result = connect_with_cancel(&settings, &cancel).await;
        let elapsed = start.elapsed();

        assert!(matches!(
            result,
            Err(WarehouseError::ConnectTimeout { .. })
        ));
        // Well under the 30s budget: the token ended the loop
        assert!(elapsed < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_fails_immediately() {
        let settings = unreachable_settings(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let start = StdInstant::now();
        let result = connect_with_cancel(&settings, &cancel).await;

        assert!(matches!(
            result,
            Err(WarehouseError::ConnectTimeout { .. })
        ));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_connect_timeout_message_names_address() {
        let err = WarehouseError::ConnectTimeout {
            address: "db1:27017".to_string(),
            timeout: Duration::from_secs(2),
        };
        assert!(err.to_string().contains("db1:27017"));
    }
}
