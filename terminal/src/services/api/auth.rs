//! # Authentication Endpoints

use super::client::ApiClient;
use crate::core::ApiError;
use shared::{LoginRequest, TokenResponse};

/// `POST /api/login`; returns the access token.
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<String, ApiError> {
    tracing::info!("Attempting login");

    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response = client
        .client
        .post(client.url("/api/login"))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let err = ApiClient::status_error(response).await;
        tracing::warn!(error = %err, "Login failed");
        return Err(err);
    }

    let body = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    tracing::info!("Login successful");
    Ok(body.access_token)
}
