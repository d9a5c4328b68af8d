//! Configuration schema definitions.
//!
//! Every section has defaults so the proxy can start from environment
//! variables alone. All types derive `Deserialize` so they can be read
//! from a TOML file.

use serde::Deserialize;

/// Location endpoint of the TripAdvisor Content API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.content.tripadvisor.com/api/v1/location";

/// Listen port used when neither the file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 3000;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream API settings and credential policy.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Where the `key` sent upstream comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// The server holds the key; a caller-supplied `key` is ignored.
    #[default]
    Server,

    /// Every caller must pass `?key=`; the server token is unused.
    Caller,
}

/// Upstream API configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; resource paths are appended as segments.
    pub base_url: String,

    /// Server-held API key (`TRIPADVISOR_TOKEN`).
    pub token: String,

    /// Credential policy.
    pub credential_mode: CredentialMode,

    /// Optional total timeout for the outbound call. Unset means the HTTP
    /// client's default applies.
    pub timeout_secs: Option<u64>,

    /// Honour `HTTP(S)_PROXY` from the environment for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            token: String::new(),
            credential_mode: CredentialMode::Server,
            timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

// Hand-written so the token never reaches logs through `{:?}`.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("credential_mode", &self.credential_mode)
            .field("timeout_secs", &self.timeout_secs)
            .field("use_system_proxy", &self.use_system_proxy)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
