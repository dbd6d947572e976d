//! Connection settings and their resolution against a parameter source.
//!
//! Each field resolves independently: an explicit override wins, else the
//! configured parameter value, else the hard default.

use std::time::Duration;

use core_params::{ParamError, ParamSource};

use crate::common::WarehouseResult;

/// Hard default host, matching a locally run server.
pub const DEFAULT_HOST: &str = "localhost";

/// Hard default MongoDB port.
pub const DEFAULT_PORT: u16 = 27017;

/// Default overall connection budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Parameter keys recognized by [`ConnectionSettings::resolve`].
pub const PARAM_HOST: &str = "warehouse_host";
pub const PARAM_PORT: &str = "warehouse_port";
pub const PARAM_DATABASE: &str = "warehouse_database_name";
pub const PARAM_USER: &str = "warehouse_user";
pub const PARAM_AUTHENTICATE: &str = "warehouse_authenticate";
pub const PARAM_PASSWORD: &str = "warehouse_pwd";

/// Effective connection settings after resolution.
#[derive(Clone, Debug)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    /// Overall budget for establishing a verified connection, retries included.
    pub timeout: Duration,
    pub database: String,
    pub authenticate: bool,
    pub user: String,
    pub password: String,
}

/// Explicit per-field overrides; `None` falls back to the configured
/// parameter, then to the hard default.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use warehouse::ConnectionOverrides;
///
/// let overrides = ConnectionOverrides::new()
///     .with_host("db.example.org")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<Duration>,
    pub database: Option<String>,
    pub authenticate: Option<bool>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set credentials and turn authentication on.
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.authenticate = Some(true);
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }
}

impl ConnectionSettings {
    /// Resolve effective settings from `overrides` and `params`.
    ///
    /// The timeout has no parameter key; it is override-or-default only.
    pub fn resolve<P: ParamSource>(
        params: &P,
        overrides: &ConnectionOverrides,
    ) -> WarehouseResult<Self> {
        let host = match &overrides.host {
            Some(host) => host.clone(),
            None => params.get_str(PARAM_HOST, DEFAULT_HOST),
        };

        let port = match overrides.port {
            Some(port) => port,
            None => {
                let raw = params.get_int(PARAM_PORT, i64::from(DEFAULT_PORT))?;
                u16::try_from(raw).map_err(|_| ParamError::Parse {
                    key: PARAM_PORT.to_string(),
                    details: format!("{} is out of range for a port", raw),
                })?
            }
        };

        let database = match &overrides.database {
            Some(database) => database.clone(),
            None => params.get_str(PARAM_DATABASE, ""),
        };

        let authenticate = match overrides.authenticate {
            Some(authenticate) => authenticate,
            None => params.get_bool(PARAM_AUTHENTICATE, false)?,
        };

        let user = match &overrides.user {
            Some(user) => user.clone(),
            None => params.get_str(PARAM_USER, ""),
        };

        let password = match &overrides.password {
            Some(password) => password.clone(),
            None => params.get_str(PARAM_PASSWORD, ""),
        };

        Ok(Self {
            host,
            port,
            timeout: overrides.timeout.unwrap_or(DEFAULT_TIMEOUT),
            database,
            authenticate,
            user,
            password,
        })
    }

    /// The `host:port` address this configuration points at.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            database: String::new(),
            authenticate: false,
            user: String::new(),
            password: String::new(),
        }
    }
}
