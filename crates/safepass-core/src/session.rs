//! Sync mode controller.
//!
//! Process-wide state machine with two states, `LocalOnly` and
//! `CloudEnabled`, and two transitions: enabling cloud sync after the
//! identity provider confirms a session (which triggers the one-shot
//! migration), and reverting to local-only on explicit sign-out. There is
//! no partial cloud state. The controller is consulted fresh on every
//! operation because authentication state can change outside its own
//! triggers (token expiry).

use crate::auth::{AuthResult, SessionPersistence};
use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::migrate::{migrate_local_to_cloud, MigrationOutcome};
use crate::store::{Backend, LocalVault, RemoteVault};

/// Which backing store is authoritative for credential operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    LocalOnly,
    CloudEnabled,
}

/// The authenticated cloud identity, present only when cloud sync is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudIdentity {
    pub id: String,
    pub email: Option<String>,
}

/// A snapshot of the sync state at the moment it was queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSession {
    pub mode: SyncMode,
    pub identity: Option<CloudIdentity>,
}

impl SyncSession {
    #[must_use]
    pub const fn local_only() -> Self {
        Self {
            mode: SyncMode::LocalOnly,
            identity: None,
        }
    }

    #[must_use]
    pub const fn cloud_enabled(identity: CloudIdentity) -> Self {
        Self {
            mode: SyncMode::CloudEnabled,
            identity: Some(identity),
        }
    }
}

/// Single source of truth for backend selection.
pub struct SyncController<K: KeyValueStore, S: SessionPersistence> {
    local: LocalVault<K>,
    remote: Option<RemoteVault<S>>,
}

impl<K: KeyValueStore, S: SessionPersistence> SyncController<K, S> {
    pub const fn new(local: LocalVault<K>, remote: Option<RemoteVault<S>>) -> Self {
        Self { local, remote }
    }

    pub const fn local(&self) -> &LocalVault<K> {
        &self.local
    }

    pub const fn remote(&self) -> Option<&RemoteVault<S>> {
        self.remote.as_ref()
    }

    /// Current sync session, queried fresh from the identity provider.
    pub async fn session(&self) -> SyncSession {
        let Some(remote) = self.remote.as_ref() else {
            return SyncSession::local_only();
        };
        match remote.current_session().await {
            Some(auth) => SyncSession::cloud_enabled(CloudIdentity {
                id: auth.user.id,
                email: auth.user.email,
            }),
            None => SyncSession::local_only(),
        }
    }

    /// Select the backend for the next operation based on a fresh session
    /// check.
    pub async fn backend(&self) -> Backend<'_, K, S> {
        match self.session().await.mode {
            SyncMode::CloudEnabled => self
                .remote
                .as_ref()
                .map_or(Backend::Local(&self.local), Backend::Remote),
            SyncMode::LocalOnly => Backend::Local(&self.local),
        }
    }

    /// Enter `CloudEnabled` after the identity provider confirmed a session,
    /// migrating local records to the cloud before normal operation resumes.
    ///
    /// Returns `None` when no confirmed identity exists, in which case the
    /// controller stays in `LocalOnly`.
    pub async fn activate_cloud(&self) -> Result<Option<MigrationOutcome>> {
        let Some(remote) = self.remote.as_ref() else {
            return Ok(None);
        };
        if remote.current_session().await.is_none() {
            return Ok(None);
        }
        let outcome = migrate_local_to_cloud(&self.local, remote).await?;
        Ok(Some(outcome))
    }

    /// Explicit user-confirmed sign-out: revert to `LocalOnly`. Subsequent
    /// operations read the local vault, which may be empty if migration
    /// previously cleared it.
    pub async fn deactivate_cloud(&self) -> AuthResult<()> {
        let Some(remote) = self.remote.as_ref() else {
            return Ok(());
        };
        let Some(session) = remote.current_session().await else {
            return Ok(());
        };
        remote.auth().sign_out(&session.access_token).await
    }
}
