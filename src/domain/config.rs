use serde::{Deserialize, Serialize};

/// ChatKit relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream session API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream session API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the session-creation API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for the outbound session call in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Server-held credentials and identifiers, resolved once at startup.
///
/// Loaded from the process environment and never written to disk or
/// serialized. Immutable for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Upstream API key (`OPENAI_API_KEY`); required
    pub api_key: String,
    /// Workflow every session is attached to (`CHATKIT_WORKFLOW_ID`);
    /// tolerated-absent at startup, but every session request fails
    /// until it is set
    pub workflow_id: Option<String>,
    /// Domain public key (`CHATKIT_DOMAIN_PUBLIC_KEY`); informational
    pub domain_public_key: Option<String>,
    /// Frontend origin (`FRONTEND_URL`); informational
    pub frontend_url: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}
