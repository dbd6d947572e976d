use std::time::Instant;

use mongodb::{Client, bson::doc};

/// Health check status for an established warehouse connection
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the server answered the ping
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Check connectivity with a server ping.
///
/// # Example
/// ```ignore
/// use warehouse::{connect, health::check_health};
///
/// let client = connect(&settings).await?;
/// assert!(check_health(&client).await);
/// ```
pub async fn check_health(client: &Client) -> bool {
    ping(client).await.is_ok()
}

/// Check connectivity with timing information and any error message.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match ping(client).await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}

async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(())
}
