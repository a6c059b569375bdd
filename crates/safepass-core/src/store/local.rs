//! Local credential backend.
//!
//! The entire credential set is one obfuscated JSON blob under a single
//! storage key. Every mutation rewrites the whole blob (O(n) per mutation,
//! fine for the tens-to-low-hundreds of records this app expects). Any read
//! failure (missing key, malformed base64, bad JSON) is treated as "no
//! data", never as a fatal error.

use crate::error::Result;
use crate::kv::{KeyValueStore, CREDENTIALS_KEY};
use crate::models::{CredentialDraft, CredentialRecord};
use crate::obfuscate::{deobfuscate, obfuscate};
use crate::store::CredentialStore;

/// Obfuscated-blob credential vault over a key/value store.
pub struct LocalVault<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> LocalVault<K> {
    pub const fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Read the full record sequence. Corrupt or missing data reads as empty.
    pub fn read_all(&self) -> Vec<CredentialRecord> {
        let Ok(Some(blob)) = self.kv.get(CREDENTIALS_KEY) else {
            return Vec::new();
        };
        let Some(decoded) = deobfuscate(&blob) else {
            tracing::warn!("local credential blob failed to decode; treating as empty");
            return Vec::new();
        };
        match serde_json::from_str(&decoded) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!("local credential blob failed to parse: {error}");
                Vec::new()
            }
        }
    }

    /// Serialize and store the full record sequence.
    pub fn write_all(&self, records: &[CredentialRecord]) -> Result<()> {
        let serialized = serde_json::to_string(records)?;
        self.kv.set(CREDENTIALS_KEY, &obfuscate(&serialized))
    }

    /// Remove every record from the vault.
    pub fn clear(&self) -> Result<()> {
        self.write_all(&[])
    }
}

impl<K: KeyValueStore> CredentialStore for LocalVault<K> {
    async fn list(&self) -> Result<Vec<CredentialRecord>> {
        Ok(self.read_all())
    }

    async fn create(&self, draft: &CredentialDraft) -> Result<Option<CredentialRecord>> {
        let mut records = self.read_all();
        let record = CredentialRecord::new_local(draft);
        records.push(record.clone());
        self.write_all(&records)?;
        Ok(Some(record))
    }

    async fn update(
        &self,
        id: &str,
        draft: &CredentialDraft,
    ) -> Result<Option<CredentialRecord>> {
        let mut records = self.read_all();
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        record.apply(draft);
        let updated = record.clone();
        self.write_all(&records)?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.read_all();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    async fn search(&self, query: &str) -> Result<Vec<CredentialRecord>> {
        let query = query.trim();
        let records = self.read_all();
        if query.is_empty() {
            return Ok(records);
        }
        Ok(records
            .into_iter()
            .filter(|record| record.matches_query(query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::kv::MemoryKeyValueStore;

    fn setup() -> LocalVault<MemoryKeyValueStore> {
        LocalVault::new(MemoryKeyValueStore::new())
    }

    fn draft(service: &str, username: &str, email: &str) -> CredentialDraft {
        CredentialDraft {
            service: service.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn create_then_list_contains_matching_record() {
        let vault = setup();
        let created = vault
            .create(&draft("GitHub", "octocat", ""))
            .await
            .unwrap()
            .unwrap();

        let records = vault.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], created);
        assert_eq!(records[0].service, "GitHub");
        assert_eq!(records[0].created_at, records[0].updated_at);
    }

    #[tokio::test]
    async fn write_then_read_preserves_order() {
        let vault = setup();
        let records: Vec<CredentialRecord> = ["one", "two", "three"]
            .iter()
            .map(|name| CredentialRecord::new_local(&draft(name, "user", "")))
            .collect();

        vault.write_all(&records).unwrap();
        assert_eq!(vault.read_all(), records);

        vault.write_all(&[]).unwrap();
        assert!(vault.read_all().is_empty());
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_and_keeps_created_at() {
        let vault = setup();
        let created = vault
            .create(&draft("GitHub", "octocat", ""))
            .await
            .unwrap()
            .unwrap();

        let updated = vault
            .update(&created.id, &draft("GitHub", "monalisa", ""))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.username, "monalisa");
    }

    #[tokio::test]
    async fn update_missing_id_returns_none() {
        let vault = setup();
        let result = vault
            .update("missing", &draft("GitHub", "octocat", ""))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_record() {
        let vault = setup();
        let keep = vault
            .create(&draft("Keep", "user", ""))
            .await
            .unwrap()
            .unwrap();
        let remove = vault
            .create(&draft("Remove", "user", ""))
            .await
            .unwrap()
            .unwrap();

        assert!(vault.delete(&remove.id).await.unwrap());
        let records = vault.list().await.unwrap();
        assert_eq!(records, vec![keep]);

        assert!(!vault.delete(&remove.id).await.unwrap());
    }

    #[tokio::test]
    async fn search_matches_service_username_email_case_insensitively() {
        let vault = setup();
        vault.create(&draft("GitHub", "octocat", "")).await.unwrap();
        vault
            .create(&draft("Mail", "", "person@gmail.com"))
            .await
            .unwrap();
        vault.create(&draft("Bank", "person", "")).await.unwrap();

        let by_service = vault.search("GITHUB").await.unwrap();
        assert_eq!(by_service.len(), 1);

        let by_email = vault.search("gmail").await.unwrap();
        assert_eq!(by_email.len(), 1);

        let by_username = vault.search("person").await.unwrap();
        assert_eq!(by_username.len(), 2);
    }

    #[tokio::test]
    async fn empty_search_is_equivalent_to_list() {
        let vault = setup();
        vault.create(&draft("GitHub", "octocat", "")).await.unwrap();
        vault.create(&draft("Mail", "person", "")).await.unwrap();

        let listed = vault.list().await.unwrap();
        assert_eq!(vault.search("").await.unwrap(), listed);
        assert_eq!(vault.search("   ").await.unwrap(), listed);
    }

    #[tokio::test]
    async fn corrupt_blob_reads_as_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.set(CREDENTIALS_KEY, "definitely not base64 !!!").unwrap();
        let vault = LocalVault::new(kv);
        assert!(vault.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_base64_with_bad_json_reads_as_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.set(CREDENTIALS_KEY, &obfuscate("{not json")).unwrap();
        let vault = LocalVault::new(kv);
        assert!(vault.list().await.unwrap().is_empty());
    }
}
