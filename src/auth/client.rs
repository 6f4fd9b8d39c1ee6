//! User backend client

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST /api/users/login, returning the session token
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.api.endpoint(&["api", "users", "login"])?;
        let response = self.api.http().post(url).json(credentials).send().await?;
        if !response.status().is_success() {
            return Err(ApiClient::rejection(response).await);
        }

        let body: LoginResponse = response.json().await?;
        tracing::info!(username = %credentials.username, "Logged in");
        Ok(body.token)
    }

    /// POST /api/users/register, returning the backend's confirmation text
    pub async fn register(&self, registration: &Registration) -> Result<String, ApiError> {
        let url = self.api.endpoint(&["api", "users", "register"])?;
        let response = self.api.http().post(url).json(registration).send().await?;
        if !response.status().is_success() {
            return Err(ApiClient::rejection(response).await);
        }

        let message = response.text().await?;
        tracing::info!(username = %registration.username, "Registered");
        Ok(message)
    }
}
