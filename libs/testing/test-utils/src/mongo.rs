//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use core_params::StaticParams;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is
/// dropped.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::TestMongo;
///
/// let mongo = TestMongo::new().await;
/// let client = warehouse::connect_from_params(
///     &mongo.params(),
///     &warehouse::ConnectionOverrides::new(),
/// ).await?;
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    port: u16,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", port);

        tracing::info!(port, "Test MongoDB ready");

        Self {
            container,
            port,
            connection_string,
        }
    }

    /// Host-mapped port of the containerized server
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Parameter source pointing the warehouse at this container
    pub fn params(&self) -> StaticParams {
        StaticParams::new()
            .set("warehouse_host", "127.0.0.1")
            .set("warehouse_port", self.port.to_string())
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_params::ParamSource;

    #[tokio::test]
    async fn test_mongo_container_starts() {
        let mongo = TestMongo::new().await;

        assert!(mongo.connection_string.starts_with("mongodb://"));
        assert_ne!(mongo.port(), 0);
    }

    #[tokio::test]
    async fn test_params_point_at_container() {
        let mongo = TestMongo::new().await;
        let params = mongo.params();

        assert_eq!(params.get_str("warehouse_host", "localhost"), "127.0.0.1");
        assert_eq!(
            params.get_int("warehouse_port", 0).unwrap(),
            i64::from(mongo.port())
        );
    }
}
