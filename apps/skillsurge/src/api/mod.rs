//! SkillSurge REST client: the single point of entry for every backend call.
//!
//! Endpoint groups live in submodules (`auth`, `profile`, `roles`, `roadmap`,
//! `interview`, `dashboard`) as `impl ApiClient` blocks. Everything except
//! login, registration and the refresh call itself funnels through
//! [`ApiClient::execute`], which attaches the bearer token and owns the
//! 401 → refresh → retry policy.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{RefreshRequest, RefreshResponse};
use crate::session::SessionStore;

pub mod auth;
pub mod dashboard;
pub mod interview;
pub mod profile;
pub mod roadmap;
pub mod roles;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: Arc<SessionStore>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Validation(format!("invalid API URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Validation(format!(
                "API URL '{base_url}' cannot be used as a base"
            )));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &Config, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        Self::new(
            &config.api_url,
            session,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request with the current bearer token.
    ///
    /// On 401, if a refresh token is stored, exactly one refresh is attempted:
    /// success stores the new pair and retries the request once (the retry's
    /// response is final); failure clears both tokens and yields
    /// [`ClientError::SessionExpired`]. Without a refresh token the 401
    /// response is returned as-is.
    async fn execute<F>(&self, method: Method, url: Url, with_body: F) -> Result<Response, ClientError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let response = self
            .send_once(&method, url.clone(), &with_body, self.session.access_token())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            return Ok(response);
        };

        warn!(%method, path = url.path(), "access token rejected, refreshing session");
        match self.refresh_tokens(&refresh_token).await {
            Ok(access_token) => {
                info!("session refreshed, retrying request");
                self.send_once(&method, url, &with_body, Some(access_token))
                    .await
            }
            Err(e) => {
                warn!("token refresh failed: {e}");
                self.session.clear_tokens()?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    async fn send_once<F>(
        &self,
        method: &Method,
        url: Url,
        with_body: &F,
        access_token: Option<String>,
    ) -> Result<Response, ClientError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let path = url.path().to_string();
        let mut request = with_body(self.client.request(method.clone(), url));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        debug!(%method, %path, status = response.status().as_u16(), "request completed");
        Ok(response)
    }

    /// POST /auth/refresh, sent outside [`Self::execute`] so a rejected
    /// refresh never triggers another refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["auth", "refresh"]))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        decode(response).await
    }

    /// Refreshes and stores the token pair, returning the new access token.
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<String, ClientError> {
        let (access_token, refresh_token) = self
            .refresh(refresh_token)
            .await?
            .into_tokens()
            .ok_or(ClientError::Unauthorized)?;
        self.session
            .set_tokens(access_token.clone(), refresh_token)?;
        Ok(access_token)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self
            .execute(Method::GET, self.endpoint(segments), |r| r)
            .await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::POST, self.endpoint(segments), |r| r.json(body))
            .await?;
        decode(response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self
            .execute(Method::POST, self.endpoint(segments), |r| r)
            .await?;
        decode(response).await
    }

    pub(crate) async fn put_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::PUT, self.endpoint(segments), |r| r.json(body))
            .await?;
        decode(response).await
    }
}

/// Maps a response to `T`, or to a [`ClientError`] carrying the server's
/// `detail` message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::from_response(status, body));
    }

    serde_json::from_str(&body).map_err(ClientError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            base,
            Arc::new(SessionStore::in_memory()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = client("http://localhost:8000/api");
        assert_eq!(
            api.endpoint(&["roadmap", "user-1", "task", "t1"]).as_str(),
            "http://localhost:8000/api/roadmap/user-1/task/t1"
        );
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let api = client("http://localhost:8000/api/");
        assert_eq!(
            api.endpoint(&["auth", "me"]).as_str(),
            "http://localhost:8000/api/auth/me"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = client("http://localhost:8000/api");
        assert_eq!(
            api.endpoint(&["interview", "a/b c"]).as_str(),
            "http://localhost:8000/api/interview/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::new(
            "not a url",
            Arc::new(SessionStore::in_memory()),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }
}
