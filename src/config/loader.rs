use crate::config::settings::GatewayConfig;
use anyhow::{bail, Result};
use std::env;
use std::fs;
use std::path::Path;

/// Load and validate gateway config from a YAML file.
///
/// Environment variables override file values so deployments can keep
/// credentials out of the config file entirely.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfig> {
    let raw = fs::read_to_string(path)?;
    let mut config: GatewayConfig = serde_yaml::from_str(&raw)?;

    apply_env_overrides(&mut config);

    // Validate credentials
    if config.api_base_url.trim().is_empty() {
        bail!("api_base_url must not be empty");
    }
    if config.api_key.trim().is_empty() {
        bail!("api_key must not be empty");
    }
    if config.username.trim().is_empty() {
        bail!("username must not be empty");
    }
    if config.business_number.trim().is_empty() {
        bail!("business_number must not be empty");
    }

    // The gateway endpoints are joined onto the base with a leading slash
    while config.api_base_url.ends_with('/') {
        config.api_base_url.pop();
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(v) = env::var("WHATSAPP_API_URL") {
        config.api_base_url = v;
    }
    if let Ok(v) = env::var("WHATSAPP_API_KEY") {
        config.api_key = v;
    }
    if let Ok(v) = env::var("WHATSAPP_USERNAME") {
        config.username = v;
    }
    if let Ok(v) = env::var("WHATSAPP_BUSINESS_NUMBER") {
        config.business_number = v;
    }
    if let Ok(v) = env::var("WHATSAPP_OLD_TOKEN") {
        config.old_token = Some(v);
    }
}
