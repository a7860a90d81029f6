use chrono::Utc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{AuthResponse, Profile, Role, User};

/// Who is signed in. Tokens and user id live in the client's session store;
/// this holds the user record for the current process.
pub struct AuthState {
    api: ApiClient,
    user: Option<User>,
}

impl AuthState {
    pub fn new(api: ApiClient) -> Self {
        Self { api, user: None }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Validates a stored access token with GET /auth/me. Any failure drops
    /// the tokens; without a token nothing is sent.
    pub async fn restore(&mut self) -> Result<Option<&User>, ClientError> {
        if self.api.session().access_token().is_none() {
            return Ok(None);
        }

        match self.api.me().await {
            Ok(resp) if resp.success && resp.user.is_some() => {
                self.user = resp.user;
            }
            Ok(_) => {
                warn!("stored token was not accepted, clearing session tokens");
                self.api.session().clear_tokens()?;
            }
            Err(e) => {
                warn!("auth check failed: {e}");
                self.api.session().clear_tokens()?;
            }
        }
        Ok(self.user.as_ref())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, ClientError> {
        let resp = self.api.login(email, password).await?;
        self.accept(resp, "Login failed")
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<&User, ClientError> {
        let resp = self.api.register(email, password, full_name).await?;
        self.accept(resp, "Registration failed")
    }

    /// Stores tokens and user id from a successful auth response. Registration
    /// may succeed without tokens (email confirmation pending).
    fn accept(&mut self, resp: AuthResponse, fallback: &str) -> Result<&User, ClientError> {
        let user = match resp.user {
            Some(user) if resp.success => user,
            _ => {
                return Err(ClientError::Auth(
                    resp.error.unwrap_or_else(|| fallback.to_string()),
                ))
            }
        };

        let session = self.api.session();
        if let (Some(access), Some(refresh)) = (resp.access_token, resp.refresh_token) {
            session.set_tokens(access, refresh)?;
        }
        session.set_user_id(user.id.clone())?;
        info!(user_id = %user.id, "signed in");

        Ok(self.user.insert(user))
    }

    /// Best-effort server logout; local state is cleared regardless.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Err(e) = self.api.logout().await {
            warn!("logout request failed: {e}");
        }
        self.user = None;
        self.api.session().clear()
    }

    /// Rotates the token pair. Any failed refresh, including a
    /// `success: false` answer, signs the user out locally: both tokens are
    /// cleared and no further request is sent. The user id is kept, as in
    /// the client's own 401 handling.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let Some(refresh_token) = self.api.session().refresh_token() else {
            return Ok(());
        };

        let tokens = match self.api.refresh(&refresh_token).await {
            Ok(resp) => resp.into_tokens(),
            Err(e) => {
                warn!("token refresh failed: {e}");
                None
            }
        };

        match tokens {
            Some((access, refresh)) => {
                self.api.session().set_tokens(access, refresh)?;
                info!("session tokens rotated");
            }
            None => {
                warn!("refresh was not accepted, signing out");
                self.user = None;
                self.api.session().clear_tokens()?;
            }
        }
        Ok(())
    }
}

/// Profile and role chosen during onboarding, plus the id every user-scoped
/// call is made with.
#[derive(Debug, Clone)]
pub struct AppState {
    user_id: String,
    pub profile: Option<Profile>,
    pub selected_role: Option<Role>,
}

impl AppState {
    /// Uses the signed-in user's id when known, otherwise a generated one.
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id: user_id.unwrap_or_else(generate_user_id),
            profile: None,
            selected_role: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    pub fn set_selected_role(&mut self, role: Option<Role>) {
        self.selected_role = role;
    }

    pub fn target_role(&self) -> Option<&str> {
        self.selected_role.as_ref().map(|r| r.title.as_str())
    }
}

/// `user-<base36 epoch millis>`
pub fn generate_user_id() -> String {
    format!("user-{}", to_base36(Utc::now().timestamp_millis().unsigned_abs()))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
