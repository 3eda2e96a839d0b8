use crate::cache::token_cache::{CachedToken, TokenStore};
use crate::config::settings::GatewayConfig;
use crate::errors::GatewayError;
use crate::helpers::time::{parse_expiry, Clock};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const TOKEN_CACHE_KEY: &str = "whatsapp_api_token";
const GENERATE_ENDPOINT: &str = "/psms/api/messages/token?action=generate";

const TOKEN_ACTIONS: &[&str] = &["enable", "disable", "delete"];

/// Owns the gateway credential lifecycle: cache lookup, expiry check,
/// generation against the token endpoint, and forced refresh.
pub struct TokenManager {
    client: Client,
    api_base_url: String,
    api_key: String,
    old_token: Option<String>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    /// Single-flight gate around the expiry-check-then-generate sequence so
    /// concurrent callers observing a stale token trigger one generation.
    refresh_gate: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        client: Client,
        config: &GatewayConfig,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            old_token: config.old_token.clone(),
            store,
            clock,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Produce a currently-valid token, regenerating through the gateway when
    /// the cached one is missing, incomplete or expired. `None` means the
    /// caller has no usable credential for this call.
    pub async fn get_token(&self) -> Option<String> {
        if let Some(token) = self.cached_valid().await {
            return Some(token);
        }

        let _gate = self.refresh_gate.lock().await;
        // a concurrent caller may have regenerated while we waited on the gate
        if let Some(token) = self.cached_valid().await {
            return Some(token);
        }

        match self.store.get(TOKEN_CACHE_KEY).await {
            // expired entry: rotate using its value as the seed
            Some(cached) if !cached.value.is_empty() => {
                self.generate_token(Some(&cached.value)).await
            }
            // incomplete entry or empty cache: bootstrap from the configured seed
            _ => self.generate_token(self.old_token.as_deref()).await,
        }
    }

    async fn cached_valid(&self) -> Option<String> {
        self.store
            .get(TOKEN_CACHE_KEY)
            .await
            .filter(|t| !t.value.is_empty() && self.clock.now_unix() < t.expires_at)
            .map(|t| t.value)
    }

    /// Issue one generation call against the token endpoint and cache the
    /// result. Terminal for the current call: failures are logged and
    /// reported as `None`, never retried here.
    async fn generate_token(&self, seed: Option<&str>) -> Option<String> {
        match self.request_token(seed).await {
            Ok(token) => Some(token),
            Err(_) => None,
        }
    }

    async fn request_token(&self, seed: Option<&str>) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.api_base_url, GENERATE_ENDPOINT);
        let body = match seed {
            Some(seed) => json!({ "old_token": seed }),
            None => json!({}),
        };

        let response = self
            .client
            .post(&url)
            .header("apiKey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!("Token generation failed: {err}");
                GatewayError::RequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Token generation failed: HTTP {status}");
            return Err(GatewayError::RequestFailed);
        }

        let data: Value = response.json().await.map_err(|err| {
            error!("Token generation response unreadable: {err}");
            GatewayError::MalformedResponse
        })?;

        let Some(token) = data.get("token").and_then(Value::as_str) else {
            error!("Token generation response missing required keys.");
            return Err(GatewayError::MalformedResponse);
        };
        let Some(expires_at) = expiry_field(data.get("expiryDate")) else {
            error!("Token generation response missing required keys.");
            return Err(GatewayError::MalformedResponse);
        };

        self.store
            .set(TOKEN_CACHE_KEY, CachedToken::new(token.to_string(), expires_at))
            .await;
        Ok(token.to_string())
    }

    /// Out-of-band refresh invoked by the dispatcher on a 401. Reports a
    /// human-readable status, never the token itself, and does not retry the
    /// call that triggered it.
    pub async fn refresh_token(&self) -> String {
        match self.old_token.clone() {
            Some(seed) => {
                let _ = self.generate_token(Some(&seed)).await;
                info!("Token refreshed");
                "Token refreshed".to_string()
            }
            None => {
                error!("Old Token Error: Token could not be refreshed");
                "Old Token Error: Token could not be refreshed".to_string()
            }
        }
    }

    /// Enable, disable, or delete a token. Any other action is rejected
    /// before touching the network. Returns the raw provider response.
    pub async fn manage_token(&self, action: &str, token: &str) -> Result<Value, GatewayError> {
        if !TOKEN_ACTIONS.contains(&action) {
            return Err(GatewayError::InvalidAction);
        }

        let url = format!("{}/token?action={action}", self.api_base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "token": token }))
            .send()
            .await
            .map_err(|err| {
                error!("Token {action} request failed: {err}");
                GatewayError::RequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Token {action} request failed: HTTP {status}");
            return Err(GatewayError::RequestFailed);
        }

        response.json().await.map_err(|err| {
            error!("Token {action} response unreadable: {err}");
            GatewayError::MalformedResponse
        })
    }
}

fn expiry_field(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::String(raw) => parse_expiry(raw),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}
