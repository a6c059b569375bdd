//! Remote credential backend.
//!
//! Delegates every operation to the remote row store, scoped by the
//! identity from the active auth session. This backend fails closed: no
//! authenticated identity or any transport error degrades to an empty or
//! null result, logged but never raised past this boundary. Callers must
//! treat empty/None results from this backend as "operation did not
//! happen", not retry silently.

use crate::auth::{AuthSession, SessionPersistence, SupabaseAuthClient};
use crate::error::Result;
use crate::models::{CredentialDraft, CredentialRecord};
use crate::remote::{PasswordRow, PasswordsApi};
use crate::store::CredentialStore;

pub struct RemoteVault<S: SessionPersistence> {
    auth: SupabaseAuthClient<S>,
    api: PasswordsApi,
}

impl<S: SessionPersistence> RemoteVault<S> {
    pub const fn new(auth: SupabaseAuthClient<S>, api: PasswordsApi) -> Self {
        Self { auth, api }
    }

    pub const fn auth(&self) -> &SupabaseAuthClient<S> {
        &self.auth
    }

    /// Current authenticated session, queried fresh. `None` means the
    /// backend cannot serve any operation.
    pub async fn current_session(&self) -> Option<AuthSession> {
        match self.auth.restore_session().await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!("failed to restore cloud session: {error}");
                None
            }
        }
    }
}

impl<S: SessionPersistence> CredentialStore for RemoteVault<S> {
    async fn list(&self) -> Result<Vec<CredentialRecord>> {
        let Some(session) = self.current_session().await else {
            return Ok(Vec::new());
        };
        match self
            .api
            .list(&session.access_token, &session.user.id)
            .await
        {
            Ok(rows) => Ok(rows.into_iter().map(PasswordRow::into_record).collect()),
            Err(error) => {
                tracing::error!("cloud list failed: {error}");
                Ok(Vec::new())
            }
        }
    }

    async fn create(&self, draft: &CredentialDraft) -> Result<Option<CredentialRecord>> {
        let Some(session) = self.current_session().await else {
            return Ok(None);
        };
        match self
            .api
            .insert(&session.access_token, &session.user.id, draft)
            .await
        {
            Ok(row) => Ok(Some(row.into_record())),
            Err(error) => {
                tracing::error!("cloud create failed: {error}");
                Ok(None)
            }
        }
    }

    async fn update(
        &self,
        id: &str,
        draft: &CredentialDraft,
    ) -> Result<Option<CredentialRecord>> {
        let Some(session) = self.current_session().await else {
            return Ok(None);
        };
        match self.api.update(&session.access_token, id, draft).await {
            Ok(row) => Ok(row.map(PasswordRow::into_record)),
            Err(error) => {
                tracing::error!("cloud update failed: {error}");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let Some(session) = self.current_session().await else {
            return Ok(false);
        };
        match self.api.delete(&session.access_token, id).await {
            Ok(deleted) => Ok(deleted),
            Err(error) => {
                tracing::error!("cloud delete failed: {error}");
                Ok(false)
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<CredentialRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }
        let Some(session) = self.current_session().await else {
            return Ok(Vec::new());
        };
        match self
            .api
            .search(&session.access_token, &session.user.id, query)
            .await
        {
            Ok(rows) => Ok(rows.into_iter().map(PasswordRow::into_record).collect()),
            Err(error) => {
                tracing::error!("cloud search failed: {error}");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoSessionPersistence;

    fn vault() -> RemoteVault<NoSessionPersistence> {
        RemoteVault::new(
            SupabaseAuthClient::new("https://demo.supabase.co", "anon", NoSessionPersistence)
                .unwrap(),
            PasswordsApi::new("https://demo.supabase.co", "anon").unwrap(),
        )
    }

    #[tokio::test]
    async fn operations_without_identity_fail_closed() {
        let vault = vault();
        assert!(vault.list().await.unwrap().is_empty());
        assert!(vault.search("query").await.unwrap().is_empty());
        assert!(vault
            .create(&CredentialDraft {
                service: "GitHub".to_string(),
                username: "octocat".to_string(),
                password: "secret".to_string(),
                ..CredentialDraft::default()
            })
            .await
            .unwrap()
            .is_none());
        assert!(vault
            .update("id", &CredentialDraft::default())
            .await
            .unwrap()
            .is_none());
        assert!(!vault.delete("id").await.unwrap());
    }
}
