// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Bearer-token lifecycle: login sets it, logout and expiry clear it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::fs;

use crate::error::ApiError;

/// File name of the persisted session inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// The authenticated session shared by every network call site.
///
/// Clones share the same token. When a path is set, the token is persisted
/// as `{"token": "..."}` so it survives restarts.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    path: Option<PathBuf>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Stored {
    token: String,
}

impl Session {
    /// An in-memory session without a token.
    pub fn new() -> Self {
        Self::default()
    }

    /// An in-memory session holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
            path: None,
        }
    }

    /// Loads the session persisted under `state_dir`. A missing file yields an
    /// empty session that will persist there on login.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[tracing::instrument]
    pub async fn load(state_dir: &Path) -> Result<Self, ApiError> {
        let path = state_dir.join(SESSION_FILE);
        let token = match fs::read_to_string(&path).await {
            Ok(s) => {
                let stored: Stored = serde_json::from_str(&s)?;
                Some(stored.token).filter(|t| !t.is_empty())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(authenticated = token.is_some(), "session loaded");

        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        })
    }

    /// The bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredential`] when logged out.
    pub fn token(&self) -> Result<String, ApiError> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ApiError::MissingCredential)
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stores a new token and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written.
    pub async fn login(&self, token: impl Into<String>) -> Result<(), ApiError> {
        let token = token.into();
        if let Some(path) = &self.path {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).await?;
            }
            let content = serde_json::to_string(&Stored {
                token: token.clone(),
            })?;
            fs::write(path, content).await?;
        }
        self.set(Some(token));
        Ok(())
    }

    /// Clears the token and removes the persisted copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be removed.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.set(None);
        if let Some(path) = &self.path {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Drops a token the server rejected.
    pub(crate) async fn expire(&self) {
        tracing::warn!("token rejected by server, clearing session");
        if let Err(e) = self.logout().await {
            tracing::warn!(err = %e, "failed to remove session file");
        }
    }

    fn set(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
