//! Credential record model

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::now_ms;

/// A saved credential entry.
///
/// `id` is assigned by whichever backend creates the record: the local vault
/// uses a UUIDv7 (time-sortable string), the remote store assigns its own
/// identifier. Ids are not interchangeable across backends.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Backend-assigned unique identifier
    pub id: String,
    /// Service label (site or app name)
    pub service: String,
    /// Account username (may be empty when email is set)
    pub username: String,
    /// Account email (may be empty when username is set)
    pub email: String,
    /// The stored secret
    pub password: String,
    /// Free-form notes
    pub notes: String,
    /// Creation timestamp (Unix ms), immutable after creation
    pub created_at: i64,
    /// Last update timestamp (Unix ms), refreshed on every mutation
    pub updated_at: i64,
}

impl CredentialRecord {
    /// Create a new locally-assigned record from draft fields.
    #[must_use]
    pub fn new_local(draft: &CredentialDraft) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::now_v7().to_string(),
            service: draft.service.clone(),
            username: draft.username.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply draft fields to this record, refreshing `updated_at`.
    pub fn apply(&mut self, draft: &CredentialDraft) {
        self.service = draft.service.clone();
        self.username = draft.username.clone();
        self.email = draft.email.clone();
        self.password = draft.password.clone();
        self.notes = draft.notes.clone();
        self.updated_at = now_ms();
    }

    /// Case-insensitive substring match against service, username, and email.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.service.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }

    /// Extract the user-meaningful fields, discarding id and timestamps.
    #[must_use]
    pub fn to_draft(&self) -> CredentialDraft {
        CredentialDraft {
            service: self.service.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User-provided credential fields, before any backend has assigned
/// an id or timestamps.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    pub service: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub notes: String,
}

impl CredentialDraft {
    /// Validate required fields before any backend call.
    ///
    /// Service and password must be non-empty, and at least one of
    /// username/email must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(Error::Validation("service is required".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(Error::Validation("password is required".to_string()));
        }
        if self.username.trim().is_empty() && self.email.trim().is_empty() {
            return Err(Error::Validation(
                "at least one of username or email is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for CredentialDraft {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialDraft")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("notes", &self.notes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> CredentialDraft {
        CredentialDraft {
            service: "GitHub".to_string(),
            username: "octocat".to_string(),
            email: String::new(),
            password: "hunter2".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn new_local_assigns_unique_time_based_ids() {
        let first = CredentialRecord::new_local(&sample_draft());
        let second = CredentialRecord::new_local(&sample_draft());
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
        assert!(first.created_at > 0);
    }

    #[test]
    fn apply_refreshes_updated_at_only() {
        let mut record = CredentialRecord::new_local(&sample_draft());
        let created_at = record.created_at;

        let mut changes = sample_draft();
        changes.password = "correct horse".to_string();
        record.apply(&changes);

        assert_eq!(record.created_at, created_at);
        assert!(record.updated_at >= created_at);
        assert_eq!(record.password, "correct horse");
    }

    #[test]
    fn matches_query_is_case_insensitive() {
        let record = CredentialRecord::new_local(&sample_draft());
        assert!(record.matches_query("github"));
        assert!(record.matches_query("OCTO"));
        assert!(!record.matches_query("gitlab"));
    }

    #[test]
    fn validate_requires_service_and_password() {
        let mut draft = sample_draft();
        draft.service = "  ".to_string();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));

        let mut draft = sample_draft();
        draft.password = String::new();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_requires_username_or_email() {
        let mut draft = sample_draft();
        draft.username = String::new();
        draft.email = String::new();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));

        draft.email = "octo@example.com".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let record = CredentialRecord::new_local(&sample_draft());
        let rendered = format!("{record:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
