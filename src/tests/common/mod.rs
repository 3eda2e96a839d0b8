pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use crate::cache::token_cache::InMemoryTokenStore;
use crate::config::settings::GatewayConfig;
use crate::dispatch::client::MessageDispatcher;
use crate::helpers::time::Clock;
use crate::token::manager::TokenManager;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Deterministic clock for expiry-path tests.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn at(now: i64) -> Arc<Self> {
        Arc::new(Self { now: AtomicI64::new(now) })
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub fn test_config(base_url: &str, old_token: Option<&str>) -> GatewayConfig {
    GatewayConfig {
        api_base_url: base_url.to_string(),
        api_key: "api-key-1".to_string(),
        username: "acme".to_string(),
        business_number: "2348000000000".to_string(),
        old_token: old_token.map(str::to_string),
        timeout_seconds: 5,
        server: None,
        logging: None,
    }
}

pub fn build_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Manager plus its backing store and clock, wired against a mock gateway.
pub fn build_manager(
    config: &GatewayConfig,
    clock: Arc<dyn Clock>,
) -> (Arc<TokenManager>, Arc<InMemoryTokenStore>) {
    let store = Arc::new(InMemoryTokenStore::new());
    let manager = Arc::new(TokenManager::new(
        build_reqwest_client(),
        config,
        store.clone(),
        clock,
    ));
    (manager, store)
}

pub fn build_dispatcher(config: &GatewayConfig, manager: Arc<TokenManager>) -> MessageDispatcher {
    MessageDispatcher::new(
        build_reqwest_client(),
        &config.api_base_url,
        &config.username,
        &config.business_number,
        manager,
    )
}

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}
