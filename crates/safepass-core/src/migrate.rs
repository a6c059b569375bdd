//! One-shot migration of local records into the cloud backend.
//!
//! Best-effort and non-transactional, preserved as the original behavior:
//! each local record is submitted in original order carrying only the
//! user-meaningful fields (the target assigns new ids and timestamps), and
//! the local blob is cleared unconditionally afterwards, even when some
//! records failed to land remotely. Callers should block user-triggered
//! mutations for the duration of the migration.

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::store::{CredentialStore, LocalVault};

/// What happened during a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOutcome {
    /// Number of local records submitted.
    pub attempted: usize,
    /// Number of records the target confirmed.
    pub migrated: usize,
}

impl MigrationOutcome {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.migrated == self.attempted
    }
}

/// Copy all local records into `target`, then clear the local vault.
pub async fn migrate_local_to_cloud<K, T>(
    local: &LocalVault<K>,
    target: &T,
) -> Result<MigrationOutcome>
where
    K: KeyValueStore,
    T: CredentialStore,
{
    let records = local.read_all();
    let attempted = records.len();
    let mut migrated = 0usize;

    for record in &records {
        match target.create(&record.to_draft()).await {
            Ok(Some(_)) => migrated += 1,
            Ok(None) => {
                tracing::warn!(service = %record.service, "record not accepted by cloud store");
            }
            Err(error) => {
                tracing::warn!(service = %record.service, "failed to migrate record: {error}");
            }
        }
    }

    // Local storage is wiped regardless of per-record outcomes.
    local.clear()?;

    if migrated < attempted {
        tracing::warn!("migration incomplete: {migrated} of {attempted} records transferred");
    } else {
        tracing::info!("migrated {migrated} records to cloud storage");
    }

    Ok(MigrationOutcome {
        attempted,
        migrated,
    })
}

/// Convenience check used by UIs to decide whether to offer migration.
#[must_use]
pub fn has_local_records<K: KeyValueStore>(local: &LocalVault<K>) -> bool {
    !local.read_all().is_empty()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::kv::MemoryKeyValueStore;
    use crate::models::CredentialDraft;

    fn draft(service: &str) -> CredentialDraft {
        CredentialDraft {
            service: service.to_string(),
            username: "user".to_string(),
            email: String::new(),
            password: "secret".to_string(),
            notes: "note".to_string(),
        }
    }

    #[tokio::test]
    async fn migrates_all_records_and_clears_local() {
        let local = LocalVault::new(MemoryKeyValueStore::new());
        for service in ["one", "two", "three"] {
            local.create(&draft(service)).await.unwrap();
        }
        let originals = local.read_all();

        // Any CredentialStore works as a target; a second vault stands in
        // for the cloud backend.
        let target = LocalVault::new(MemoryKeyValueStore::new());

        let outcome = migrate_local_to_cloud(&local, &target).await.unwrap();
        assert_eq!(
            outcome,
            MigrationOutcome {
                attempted: 3,
                migrated: 3
            }
        );
        assert!(outcome.is_complete());

        // Local is empty afterwards.
        assert!(local.read_all().is_empty());
        assert!(!has_local_records(&local));

        // Target holds the user-meaningful fields with new ids/timestamps.
        let migrated = target.read_all();
        assert_eq!(migrated.len(), 3);
        for (original, copy) in originals.iter().zip(&migrated) {
            assert_eq!(copy.service, original.service);
            assert_eq!(copy.username, original.username);
            assert_eq!(copy.password, original.password);
            assert_eq!(copy.notes, original.notes);
            assert_ne!(copy.id, original.id);
        }
    }

    #[tokio::test]
    async fn empty_local_vault_migrates_nothing() {
        let local = LocalVault::new(MemoryKeyValueStore::new());
        let target = LocalVault::new(MemoryKeyValueStore::new());

        let outcome = migrate_local_to_cloud(&local, &target).await.unwrap();
        assert_eq!(outcome.attempted, 0);
        assert_eq!(outcome.migrated, 0);
        assert!(target.read_all().is_empty());
    }
}
