use crate::config::settings::ServerConfig;
use anyhow::Result;
use axum::body::Bytes;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

/// Delivery-report webhook: the gateway posts final delivery status here.
/// Reports are logged and acknowledged, nothing more.
pub fn router() -> Router {
    Router::new().route("/whatsapp/dlr", post(receive_dlr))
}

async fn receive_dlr(body: Bytes) -> Json<Value> {
    info!("Delivery report received: {}", String::from_utf8_lossy(&body));
    Json(json!({ "status": "success" }))
}

pub async fn serve(config: &ServerConfig) -> Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    info!("DLR webhook listening on {}", listener.local_addr()?);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
