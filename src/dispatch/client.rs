use crate::dispatch::envelope::{
    compose_template_info, MessageEnvelope, SendResponse, MESSAGE_ENDPOINT,
};
use crate::dispatch::DispatchResult;
use crate::errors::GatewayError;
use crate::token::manager::TokenManager;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Sends one templated message per call and translates the gateway's
/// acknowledgment or failure into a uniform [`DispatchResult`]. Owns no
/// durable state; the per-call envelope is discarded after the call returns.
pub struct MessageDispatcher {
    client: Client,
    api_base_url: String,
    username: String,
    business_number: String,
    token_manager: Arc<TokenManager>,
}

/// Client with the fixed connect/read timeouts applied to every gateway call.
pub fn build_http_client(timeout_seconds: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds))
        .build()
}

impl MessageDispatcher {
    pub fn new(
        client: Client,
        api_base_url: &str,
        username: &str,
        business_number: &str,
        token_manager: Arc<TokenManager>,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            business_number: business_number.to_string(),
            token_manager,
        }
    }

    /// Send a templated message. Never returns an error type: every failure
    /// branch collapses into `{success: false, message}`.
    pub async fn send_message(
        &self,
        to: &str,
        template_id: &str,
        parameters: &[String],
    ) -> DispatchResult {
        match self.dispatch(to, template_id, parameters).await {
            Ok(()) => {
                info!("Message dispatched to {to}");
                DispatchResult::ok("Message delivered successfully.")
            }
            Err(err) => DispatchResult::failed(err.to_string()),
        }
    }

    async fn dispatch(
        &self,
        to: &str,
        template_id: &str,
        parameters: &[String],
    ) -> Result<(), GatewayError> {
        let token = self
            .token_manager
            .get_token()
            .await
            .ok_or(GatewayError::TokenUnavailable)?;

        let template_info = compose_template_info(template_id, parameters);
        let envelope =
            MessageEnvelope::new(&self.username, &token, &self.business_number, to, &template_info);
        let body = serde_json::to_value(&envelope).map_err(|err| {
            error!("Envelope serialization failed: {err}");
            GatewayError::RequestFailed
        })?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
            error!("Token not usable as a header value: {err}");
            GatewayError::RequestFailed
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let response = self
            .send_request(Method::POST, MESSAGE_ENDPOINT, headers, &body)
            .await?;
        info!("Gateway response: {response}");

        let parsed: SendResponse = serde_json::from_value(response).map_err(|err| {
            error!("Acknowledgment did not match the expected shape: {err}");
            GatewayError::MalformedResponse
        })?;
        let ack = parsed
            .message_ack
            .and_then(|ack| ack.guid)
            .ok_or(GatewayError::MalformedResponse)?;

        if let Some(ack_error) = ack.error {
            error!("Gateway reported error code {}", ack_error.code);
            return Err(GatewayError::Provider { code: ack_error.code });
        }
        Ok(())
    }

    /// One HTTP exchange with the gateway. Caller headers are merged over a
    /// fixed default set; failures come back as values, never panics or
    /// bubbled transport errors. A 401 additionally forces a token refresh as
    /// a side effect while the current call still fails.
    pub(crate) async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> Result<Value, GatewayError> {
        let url = format!("{}{}", self.api_base_url, endpoint);

        let mut merged = default_headers();
        merged.extend(headers);

        let response = self
            .client
            .request(method, &url)
            .headers(merged)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                error!("API request failed: {err}");
                GatewayError::RequestFailed
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error_body = %error_body, "API request failed");
            self.token_manager.refresh_token().await;
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error_body = %error_body, "API request failed");
            return Err(GatewayError::RequestFailed);
        }

        response.json().await.map_err(|err| {
            error!("API response was not valid JSON: {err}");
            GatewayError::MalformedResponse
        })
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("whatsapp-gateway/", env!("CARGO_PKG_VERSION"))),
    );
    headers
}
