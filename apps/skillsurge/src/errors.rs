use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Client-level error type.
/// Every API call and local state transition returns `Result<T, ClientError>`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unauthorized")]
    Unauthorized,

    /// The refresh token was rejected. Local tokens have been cleared and the
    /// caller must log in again.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Login or registration was rejected, either with a 401 or with
    /// `success: false`.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session store error: {0}")]
    Session(#[from] std::io::Error),

    #[error("Resume error: {0}")]
    Resume(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// The `detail` field of a FastAPI error body, or the body itself.
fn detail_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .map(|e| match e.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or(body)
}

impl ClientError {
    /// Builds an error from a non-success response body, preferring the
    /// server's `detail` message over the raw body.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let message = detail_message(body);

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// A rejected login or registration, keeping the server's reason.
    pub fn auth_rejected(body: String, fallback: &str) -> Self {
        let message = detail_message(body);
        if message.trim().is_empty() {
            ClientError::Auth(fallback.to_string())
        } else {
            ClientError::Auth(message)
        }
    }

    /// The message a user should see, mirroring the server's `detail` where
    /// one exists.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. }
            | ClientError::NotFound(message)
            | ClientError::Auth(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the error means the user has to authenticate again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_extracted() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Only PDF files are supported"}"#.to_string(),
        );
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Only PDF files are supported");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_kept_verbatim() {
        let err = ClientError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded".to_string(),
        );
        assert_eq!(err.user_message(), "upstream exploded");
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let err = ClientError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "email"]}]}"#.to_string(),
        );
        assert!(err.user_message().contains("email"));
    }

    #[test]
    fn test_401_maps_to_unauthorized() {
        let err = ClientError::from_response(StatusCode::UNAUTHORIZED, String::new());
        assert!(err.requires_login());
    }

    #[test]
    fn test_auth_rejection_keeps_detail() {
        let err = ClientError::auth_rejected(
            r#"{"detail": "Invalid login credentials"}"#.to_string(),
            "Login failed",
        );
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert!(!err.requires_login());

        let err = ClientError::auth_rejected(String::new(), "Login failed");
        assert!(matches!(err, ClientError::Auth(ref m) if m == "Login failed"));
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let err = ClientError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Roadmap not found"}"#.to_string(),
        );
        assert!(matches!(err, ClientError::NotFound(ref m) if m == "Roadmap not found"));
    }
}
