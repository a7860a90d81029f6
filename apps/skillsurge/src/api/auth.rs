use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{Ack, AuthResponse, LoginRequest, MeResponse, RegisterRequest, ResetPasswordRequest};

use super::{decode, ApiClient};

impl ApiClient {
    /// Credential exchange for login and registration. Sent without a bearer
    /// token and outside the refresh policy, so a 401 here means the
    /// credentials were refused and maps to [`ClientError::Auth`].
    async fn exchange<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> Result<AuthResponse, ClientError> {
        let url = self.endpoint(segments);
        let path = url.path().to_string();
        let response = self.client.post(url).json(body).send().await?;
        debug!(%path, status = response.status().as_u16(), "credential exchange completed");

        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.text().await?;
            return Err(ClientError::auth_rejected(body, fallback));
        }
        decode(response).await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthResponse, ClientError> {
        self.exchange(
            &["auth", "register"],
            &RegisterRequest {
                email,
                password,
                full_name,
            },
            "Registration failed",
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.exchange(&["auth", "login"], &LoginRequest { email, password }, "Login failed")
            .await
    }

    pub async fn logout(&self) -> Result<Ack, ClientError> {
        self.post_empty(&["auth", "logout"]).await
    }

    pub async fn me(&self) -> Result<MeResponse, ClientError> {
        self.get_json(&["auth", "me"]).await
    }

    pub async fn reset_password(&self, email: &str) -> Result<Ack, ClientError> {
        self.post_json(&["auth", "reset-password"], &ResetPasswordRequest { email })
            .await
    }
}
