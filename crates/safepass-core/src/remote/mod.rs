//! Remote row-store client for the `passwords` table.
//!
//! Thin PostgREST-style client scoped by the authenticated user id. Rows are
//! always ordered newest-first; server-side search uses a case-insensitive
//! OR-combined `ilike` filter across service, username, and email.

use chrono::DateTime;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CredentialDraft, CredentialRecord};
use crate::util::compact_text;

const PASSWORDS_TABLE: &str = "passwords";

#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("Invalid remote store configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Remote store API error: {0}")]
    Api(String),
}

pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// A credential row as returned by the remote store.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordRow {
    pub id: String,
    pub service: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PasswordRow {
    /// Convert into the shared credential model. Absent optional columns
    /// map to empty strings; unparseable timestamps map to zero.
    #[must_use]
    pub fn into_record(self) -> CredentialRecord {
        CredentialRecord {
            id: self.id,
            service: self.service,
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password,
            notes: self.notes.unwrap_or_default(),
            created_at: parse_timestamp_ms(self.created_at.as_deref()),
            updated_at: parse_timestamp_ms(self.updated_at.as_deref()),
        }
    }
}

/// Authenticated client for the remote `passwords` table.
#[derive(Clone)]
pub struct PasswordsApi {
    rest_url: String,
    anon_key: String,
    client: Client,
}

impl PasswordsApi {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>) -> RemoteStoreResult<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(RemoteStoreError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            rest_url,
            anon_key,
            client: Client::builder().build()?,
        })
    }

    /// List rows belonging to the user, newest first.
    pub async fn list(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> RemoteStoreResult<Vec<PasswordRow>> {
        let url = format!(
            "{}/{PASSWORDS_TABLE}?select=*&user_id=eq.{user_id}&order=created_at.desc",
            self.rest_url
        );
        let request = self.authorized(self.client.get(url), access_token);
        self.expect_rows(request).await
    }

    /// Search rows with a case-insensitive substring filter over service,
    /// username, and email, newest first.
    pub async fn search(
        &self,
        access_token: &str,
        user_id: &str,
        query: &str,
    ) -> RemoteStoreResult<Vec<PasswordRow>> {
        let url = format!(
            "{}/{PASSWORDS_TABLE}?select=*&user_id=eq.{user_id}&or={}&order=created_at.desc",
            self.rest_url,
            urlencoding::encode(&search_filter(query)),
        );
        let request = self.authorized(self.client.get(url), access_token);
        self.expect_rows(request).await
    }

    /// Insert one row tagged with the user id; the store assigns id and
    /// timestamps.
    pub async fn insert(
        &self,
        access_token: &str,
        user_id: &str,
        draft: &CredentialDraft,
    ) -> RemoteStoreResult<PasswordRow> {
        let payload = serde_json::json!({
            "user_id": user_id,
            "service": draft.service,
            "username": draft.username,
            "email": draft.email,
            "password": draft.password,
            "notes": draft.notes,
        });
        let request = self
            .authorized(
                self.client
                    .post(format!("{}/{PASSWORDS_TABLE}", self.rest_url)),
                access_token,
            )
            .header("Prefer", "return=representation")
            .json(&payload);

        self.expect_single_row(request)
            .await?
            .ok_or_else(|| RemoteStoreError::Api("Insert returned no row".to_string()))
    }

    /// Patch the row matching `id`, refreshing its `updated_at`. Returns
    /// `None` when no row matched.
    pub async fn update(
        &self,
        access_token: &str,
        row_id: &str,
        draft: &CredentialDraft,
    ) -> RemoteStoreResult<Option<PasswordRow>> {
        let payload = serde_json::json!({
            "service": draft.service,
            "username": draft.username,
            "email": draft.email,
            "password": draft.password,
            "notes": draft.notes,
            "updated_at": chrono::Utc::now().to_rfc3339(),
        });
        let request = self
            .authorized(
                self.client
                    .patch(format!("{}/{PASSWORDS_TABLE}?id=eq.{row_id}", self.rest_url)),
                access_token,
            )
            .header("Prefer", "return=representation")
            .json(&payload);

        self.expect_single_row(request).await
    }

    /// Remove the row matching `id`. Returns `false` when no row matched.
    pub async fn delete(&self, access_token: &str, row_id: &str) -> RemoteStoreResult<bool> {
        let request = self
            .authorized(
                self.client
                    .delete(format!("{}/{PASSWORDS_TABLE}?id=eq.{row_id}", self.rest_url)),
                access_token,
            )
            .header("Prefer", "return=representation");

        Ok(self.expect_single_row(request).await?.is_some())
    }

    fn authorized(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    async fn expect_rows(&self, request: RequestBuilder) -> RemoteStoreResult<Vec<PasswordRow>> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteStoreError::Api(render_api_error(status, &body)));
        }
        Ok(response.json::<Vec<PasswordRow>>().await?)
    }

    async fn expect_single_row(
        &self,
        request: RequestBuilder,
    ) -> RemoteStoreResult<Option<PasswordRow>> {
        let rows = self.expect_rows(request).await?;
        Ok(rows.into_iter().next())
    }
}

/// Build the OR-combined `ilike` filter expression for a search query.
/// The query is percent-encoded inside each pattern so characters reserved
/// by the filter grammar survive intact and match semantics stay identical
/// to the local backend's substring matching.
#[must_use]
pub fn search_filter(query: &str) -> String {
    let pattern = urlencoding::encode(query.trim());
    format!("(service.ilike.*{pattern}*,username.ilike.*{pattern}*,email.ilike.*{pattern}*)")
}

pub fn normalize_rest_url(url: &str) -> RemoteStoreResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(RemoteStoreError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(RemoteStoreError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

fn render_api_error(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

fn parse_timestamp_ms(raw: Option<&str>) -> i64 {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map_or(0, |parsed| parsed.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_rest_url_appends_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_keeps_existing_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co/rest/v1/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn search_filter_covers_three_fields() {
        let filter = search_filter("git");
        assert_eq!(
            filter,
            "(service.ilike.*git*,username.ilike.*git*,email.ilike.*git*)"
        );
    }

    #[test]
    fn search_filter_encodes_reserved_characters() {
        let filter = search_filter("Example, Inc");
        assert_eq!(
            filter,
            "(service.ilike.*Example%2C%20Inc*,\
             username.ilike.*Example%2C%20Inc*,\
             email.ilike.*Example%2C%20Inc*)"
        );
    }

    #[test]
    fn punctuated_query_matches_same_on_both_backends() {
        let record = CredentialRecord {
            id: "row-id".to_string(),
            service: "Example, Inc portal".to_string(),
            username: "octocat".to_string(),
            email: String::new(),
            password: "hunter2".to_string(),
            notes: String::new(),
            created_at: 0,
            updated_at: 0,
        };
        assert!(record.matches_query("Example, Inc"));

        // The remote filter carries the same characters, encoded rather
        // than dropped.
        let filter = search_filter("Example, Inc");
        assert!(filter.contains("*Example%2C%20Inc*"));
        assert_eq!(
            urlencoding::decode("Example%2C%20Inc").unwrap(),
            "Example, Inc"
        );
    }

    #[test]
    fn row_converts_to_record_with_parsed_timestamps() {
        let row = PasswordRow {
            id: "row-id".to_string(),
            service: "GitHub".to_string(),
            username: None,
            email: Some("octo@example.com".to_string()),
            password: "hunter2".to_string(),
            notes: None,
            created_at: Some("2024-05-01T12:00:00+00:00".to_string()),
            updated_at: Some("2024-05-02T12:00:00+00:00".to_string()),
        };

        let record = row.into_record();
        assert_eq!(record.id, "row-id");
        assert_eq!(record.username, "");
        assert_eq!(record.email, "octo@example.com");
        assert!(record.created_at > 0);
        assert!(record.updated_at > record.created_at);
    }

    #[test]
    fn row_with_bad_timestamp_converts_to_zero() {
        let row = PasswordRow {
            id: "row-id".to_string(),
            service: "GitHub".to_string(),
            username: None,
            email: None,
            password: "hunter2".to_string(),
            notes: None,
            created_at: Some("yesterday".to_string()),
            updated_at: None,
        };
        let record = row.into_record();
        assert_eq!(record.created_at, 0);
        assert_eq!(record.updated_at, 0);
    }
}
