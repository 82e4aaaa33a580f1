//! Process-wide credential store.
//!
//! Holds the live access token and user id behind a `RwLock` so concurrent
//! calls can read the auth header while a login or profile fetch writes.
//! Writes are last-writer-wins. Sessions saved with the persist flag are
//! mirrored to a [`CredentialRepository`] and can be restored after restart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use petland_domain::{AccessToken, Credential, Header};
use tokio::sync::RwLock;

use crate::ports::{Clock, CredentialRepository, CredentialStorageError};

/// Returned when an auth header is requested with no session stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not authenticated")]
pub struct NotAuthenticated;

/// Shared handle to the current session. Cloning is cheap.
#[derive(Clone)]
pub struct CredentialStore {
    current: Arc<RwLock<Option<Credential>>>,
    repository: Arc<dyn CredentialRepository>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates an empty store. Call [`restore`](Self::restore) to pick up a
    /// remembered session.
    #[must_use]
    pub fn new(repository: Arc<dyn CredentialRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            repository,
            clock,
        }
    }

    /// Loads the persisted session, if any, into memory.
    ///
    /// A stored copy that cannot be parsed (truncated write, older format)
    /// is treated as signed out; the next `save` or `clear` replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn restore(&self) -> Result<SessionStatus, CredentialStorageError> {
        let loaded = match self.repository.load().await {
            Ok(loaded) => loaded,
            Err(CredentialStorageError::Serialization(reason)) => {
                tracing::warn!(%reason, "ignoring unreadable persisted session");
                None
            }
            Err(e) => return Err(e),
        };
        let mut current = self.current.write().await;
        if let Some(credential) = loaded {
            tracing::debug!(user_id = ?credential.user_id, "restored persisted session");
            *current = Some(credential);
        }
        Ok(SessionStatus::of(current.as_ref()))
    }

    /// Stores a freshly issued token, replacing any previous session.
    ///
    /// With `persist` the token is written durably; without it any previously
    /// remembered session is removed so it cannot be resumed later. Durable
    /// storage is updated first; on failure the in-memory session is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be updated.
    pub async fn save(
        &self,
        token: AccessToken,
        persist: bool,
    ) -> Result<(), CredentialStorageError> {
        let credential = Credential::new(token, persist, self.clock.now());
        let mut current = self.current.write().await;

        if persist {
            self.repository.save(&credential).await?;
        } else {
            self.repository.clear().await?;
        }

        *current = Some(credential);
        Ok(())
    }

    /// Returns the `Authorization` header for the current session.
    ///
    /// # Errors
    ///
    /// Returns [`NotAuthenticated`] if no token is stored.
    pub async fn auth_header(&self) -> Result<Header, NotAuthenticated> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|c| c.access_token.bearer_header())
            .ok_or(NotAuthenticated)
    }

    /// Returns a snapshot of the current session.
    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    /// Returns the current user id.
    pub async fn user_id(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|c| c.user_id.clone())
    }

    /// Records the user id for the current session.
    ///
    /// Ignored when no session is stored. The in-memory value is always
    /// updated; a persisted session is rewritten as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted copy cannot be updated.
    pub async fn set_user_id(&self, id: impl Into<String>) -> Result<(), CredentialStorageError> {
        self.update_user_id(Some(id.into())).await
    }

    /// Forgets the user id while keeping the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted copy cannot be updated.
    pub async fn clear_user_id(&self) -> Result<(), CredentialStorageError> {
        self.update_user_id(None).await
    }

    async fn update_user_id(&self, id: Option<String>) -> Result<(), CredentialStorageError> {
        let mut current = self.current.write().await;
        let Some(credential) = current.as_mut() else {
            tracing::debug!("no session stored; user id not recorded");
            return Ok(());
        };

        credential.user_id = id;
        if credential.persist {
            self.repository.save(credential).await?;
        }
        Ok(())
    }

    /// Signs out: wipes the token, the user id, and any persisted copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted copy cannot be removed. The
    /// in-memory session is cleared regardless.
    pub async fn clear(&self) -> Result<(), CredentialStorageError> {
        let mut current = self.current.write().await;
        *current = None;
        self.repository.clear().await
    }

    /// Returns the session status for display.
    pub async fn status(&self) -> SessionStatus {
        SessionStatus::of(self.current.read().await.as_ref())
    }
}

/// Status of the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token is stored.
    NotAuthenticated,
    /// A token is stored.
    Active {
        /// Whether the session survives a restart.
        persisted: bool,
        /// Owning user's id, if known.
        user_id: Option<String>,
        /// Safe preview of the token.
        token_preview: String,
        /// When the token was stored.
        issued_at: DateTime<Utc>,
    },
}

impl SessionStatus {
    fn of(credential: Option<&Credential>) -> Self {
        credential.map_or(Self::NotAuthenticated, |c| Self::Active {
            persisted: c.persist,
            user_id: c.user_id.clone(),
            token_preview: c.access_token.preview(),
            issued_at: c.issued_at,
        })
    }

    /// Returns true if a session is stored.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not signed in".to_string(),
            Self::Active {
                persisted,
                user_id,
                ..
            } => {
                let who = user_id
                    .as_deref()
                    .map_or_else(String::new, |id| format!(" as {id}"));
                let remembered = if *persisted { " (remembered)" } else { "" };
                format!("Signed in{who}{remembered}")
            }
        }
    }
}
