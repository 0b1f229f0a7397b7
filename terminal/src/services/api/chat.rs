//! # Chat Endpoint

use super::client::ApiClient;
use crate::core::ApiError;
use shared::{ChatRequest, ChatResponse};

/// `POST /api/chat` with `{message}`; returns the reply text.
#[tracing::instrument(skip_all, fields(chars = message.chars().count(), authenticated = token.is_some()))]
pub async fn send_message(
    client: &ApiClient,
    message: &str,
    token: Option<&str>,
) -> Result<String, ApiError> {
    let start = std::time::Instant::now();

    let mut request = client
        .client
        .post(client.url("/api/chat"))
        .json(&ChatRequest::new(message));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| {
        tracing::error!(error = %e, "Chat request failed");
        ApiError::from(e)
    })?;

    if !response.status().is_success() {
        let err = ApiClient::status_error(response).await;
        tracing::warn!(error = %err, duration_ms = start.elapsed().as_millis(), "Chat request rejected");
        return Err(err);
    }

    let body = response
        .json::<ChatResponse>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    tracing::info!(duration_ms = start.elapsed().as_millis(), "Chat reply received");
    Ok(body.message)
}
