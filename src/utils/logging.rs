use crate::config::settings::{GatewayConfig, LogFormat, LoggingConfig};
use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Resolve the effective logging config (CLI override > file > defaults)
/// and install the subscriber.
pub fn run(config: &GatewayConfig, arg_log_level: Option<LogLevel>) {
    let logging_config = match (&config.logging, arg_log_level) {
        (Some(cfg), Some(level)) => {
            LoggingConfig::new(level.as_str().to_string(), cfg.format.clone())
        }
        (Some(cfg), None) => cfg.clone(),
        (None, level) => LoggingConfig::new(
            level.map(|l| l.as_str().to_string()).unwrap_or("info".to_string()),
            LogFormat::Compact,
        ),
    };

    init_logging(&logging_config);
}

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}
