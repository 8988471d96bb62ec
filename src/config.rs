//! Service configuration loaded from environment variables.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use serde::Deserialize;

/// Label used when `APP_ENV` is not set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Prefix shared by every variable the service reads.
pub const ENV_PREFIX: &str = "APP_";

/// Service configuration loaded from environment variables.
///
/// Every field maps to an `APP_`-prefixed variable (`app_env` <- `APP_ENV`,
/// `port` <- `APP_PORT`, ...). Unprefixed names such as a shell's `HOST`
/// are ignored. The log filter itself is read from `RUST_LOG` when tracing
/// is initialised.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Deployment ===
    /// Free-form environment label echoed by every endpoint.
    #[serde(rename = "env", default = "default_app_env")]
    pub app_env: String,

    // === Server Configuration ===
    /// Interface the HTTP listener binds to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP listener port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Expose Prometheus metrics on `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    // === Logging ===
    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_app_env() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: default_app_env(),
            host: default_host(),
            port: default_port(),
            metrics_enabled: default_true(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Load configuration from an explicit set of variables instead of the
    /// process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The immutable environment label handed to request handlers.
    pub fn environment(&self) -> Environment {
        Environment::new(self.app_env.as_str())
    }
}

/// Deployment environment label ("development", "production", ...).
///
/// Accepted verbatim and never validated. Cloning shares the underlying
/// string, so every request task reads the same value without locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment(Arc<str>);

impl Environment {
    /// Wrap a label as-is.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
