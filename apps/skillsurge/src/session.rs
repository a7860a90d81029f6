//! Session persistence: bearer token, refresh token and user id.
//!
//! The file is the only state kept across runs. Everything else (profile,
//! roadmap, selected role) lives in memory for the duration of a command.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Token store shared by the API client and the auth state.
/// Writes go through to the backing file when one is configured.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    data: RwLock<SessionData>,
}

impl SessionStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(SessionData::default()),
        }
    }

    /// Opens the session file at `path`. A missing file is an empty session.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                SessionData::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            SessionData::default()
        };
        debug!(path = %path.display(), "session loaded");

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> SessionData {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    pub fn set_tokens(&self, access_token: String, refresh_token: String) -> Result<(), ClientError> {
        self.update(|data| {
            data.access_token = Some(access_token);
            data.refresh_token = Some(refresh_token);
        })
    }

    pub fn set_user_id(&self, user_id: String) -> Result<(), ClientError> {
        self.update(|data| data.user_id = Some(user_id))
    }

    /// Drops both tokens but keeps the user id.
    pub fn clear_tokens(&self) -> Result<(), ClientError> {
        self.update(|data| {
            data.access_token = None;
            data.refresh_token = None;
        })?;
        info!("session tokens cleared");
        Ok(())
    }

    /// Drops tokens and user id.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.update(|data| *data = SessionData::default())?;
        info!("session cleared");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut SessionData)) -> Result<(), ClientError> {
        let mut guard = self.write();
        f(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &SessionData) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(data)?;

        // Write to a temp file then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, path)?;
        debug!(path = %path.display(), "session saved");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }
}
