use serde::Deserialize;

/// ================================
/// Gateway account configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Base URL of the PSMS gateway, e.g. `https://api.example.com`.
    pub api_base_url: String,
    /// Static key for the token-generation endpoint (`apiKey` header).
    pub api_key: String,
    /// Account username embedded in every message envelope.
    pub username: String,
    /// Registered business number used as the sender address.
    pub business_number: String,
    /// Bootstrap seed for the first token generation and for forced refresh.
    /// Without it a 401-triggered refresh cannot run.
    #[serde(default)]
    pub old_token: Option<String>,
    /// Connect/read timeout applied to every gateway call.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Bind address of the delivery-report webhook.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_timeout_seconds() -> u64 {
    15
}
