use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Full name when known, otherwise the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
}

/// Returned by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl RefreshResponse {
    /// Both tokens, only when the server reported success.
    pub fn into_tokens(self) -> Option<(String, String)> {
        if !self.success {
            return None;
        }
        Some((self.access_token?, self.refresh_token?))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Option<User>,
}

/// Generic `{success, message}` acknowledgement (logout, reset password).
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}
