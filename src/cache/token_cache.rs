use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Credential entry holding the gateway token and its expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: i64,
}

impl CachedToken {
    pub fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }
}

/// Key/value credential store with per-entry expiry.
///
/// Entries are returned as stored, including stale ones: the token manager
/// does the expiry comparison itself, because an expired token's value is
/// still needed as the rotation seed for the next generation call.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<CachedToken>;
    async fn set(&self, key: &str, token: CachedToken);
}

/// Process-local store backing the CLI binary and the test suite. Deployments
/// that share credentials across processes plug in their own `TokenStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, key: &str) -> Option<CachedToken> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    async fn set(&self, key: &str, token: CachedToken) {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), token);
    }
}
