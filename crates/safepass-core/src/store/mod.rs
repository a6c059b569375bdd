//! Credential store abstraction.
//!
//! One contract, two interchangeable backends: the local obfuscated blob and
//! the remote row store. The abstraction holds no state and performs no
//! merging across backends; the active backend is selected per operation by
//! the sync controller.

mod local;
mod remote;

pub use local::LocalVault;
pub use remote::RemoteVault;

use crate::auth::SessionPersistence;
use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::models::{CredentialDraft, CredentialRecord};

/// Trait for credential storage operations (async)
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    /// List all records. The remote backend orders newest-first; the local
    /// backend preserves insertion order.
    async fn list(&self) -> Result<Vec<CredentialRecord>>;

    /// Create a record from draft fields. `Ok(None)` means the backend could
    /// not produce a record (remote backend without an authenticated
    /// identity); it is not an error.
    async fn create(&self, draft: &CredentialDraft) -> Result<Option<CredentialRecord>>;

    /// Replace a record's fields, refreshing `updated_at`. `Ok(None)` when
    /// the target no longer exists.
    async fn update(&self, id: &str, draft: &CredentialDraft)
        -> Result<Option<CredentialRecord>>;

    /// Delete a record. Returns `false` when the target no longer exists.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Case-insensitive substring search over service, username, and email.
    /// An empty query is equivalent to `list`.
    async fn search(&self, query: &str) -> Result<Vec<CredentialRecord>>;
}

/// The backend selected for the current operation.
pub enum Backend<'a, K: KeyValueStore, S: SessionPersistence> {
    Local(&'a LocalVault<K>),
    Remote(&'a RemoteVault<S>),
}

impl<K: KeyValueStore, S: SessionPersistence> CredentialStore for Backend<'_, K, S> {
    async fn list(&self) -> Result<Vec<CredentialRecord>> {
        match self {
            Self::Local(vault) => vault.list().await,
            Self::Remote(vault) => vault.list().await,
        }
    }

    async fn create(&self, draft: &CredentialDraft) -> Result<Option<CredentialRecord>> {
        // Validation happens here, before any backend call.
        draft.validate()?;
        match self {
            Self::Local(vault) => vault.create(draft).await,
            Self::Remote(vault) => vault.create(draft).await,
        }
    }

    async fn update(
        &self,
        id: &str,
        draft: &CredentialDraft,
    ) -> Result<Option<CredentialRecord>> {
        match self {
            Self::Local(vault) => vault.update(id, draft).await,
            Self::Remote(vault) => vault.update(id, draft).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self {
            Self::Local(vault) => vault.delete(id).await,
            Self::Remote(vault) => vault.delete(id).await,
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<CredentialRecord>> {
        match self {
            Self::Local(vault) => vault.search(query).await,
            Self::Remote(vault) => vault.search(query).await,
        }
    }
}

impl<K: KeyValueStore, S: SessionPersistence> Backend<'_, K, S> {
    /// Human-readable backend label for status output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "cloud",
        }
    }
}
