use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use safepass_core::gate::PasscodeGate;
use safepass_core::generator::password_strength;
use safepass_core::icons::service_icon_url;
use safepass_core::kv::FileKeyValueStore;
use safepass_core::session::SyncController;
use safepass_core::store::{LocalVault, RemoteVault};
use safepass_core::CredentialRecord;
use serde::Serialize;

use crate::auth::{remote_vault_for_profile, SessionStore};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub type Controller = SyncController<FileKeyValueStore, SessionStore>;

#[derive(Debug, Serialize)]
pub struct CredentialListItem {
    pub id: String,
    pub service: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub strength: String,
    pub notes: String,
    pub icon_url: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
}

pub fn resolve_vault_path(cli_vault_path: Option<PathBuf>) -> PathBuf {
    cli_vault_path
        .or_else(|| env::var_os("SAFEPASS_VAULT_PATH").map(PathBuf::from))
        .unwrap_or_else(default_vault_path)
}

pub fn default_vault_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("safepass")
        .join("vault.json")
}

pub fn open_kv(vault_path: &Path) -> Result<FileKeyValueStore, CliError> {
    if let Some(parent) = vault_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(FileKeyValueStore::new(vault_path))
}

/// Build the sync controller for this invocation. The remote backend is
/// present only when the resolved profile carries Supabase settings.
pub fn open_controller(vault_path: &Path, profile: Option<&str>) -> Result<Controller, CliError> {
    let local = LocalVault::new(open_kv(vault_path)?);
    let remote = remote_vault_from_profile(profile)?;
    Ok(SyncController::new(local, remote))
}

pub fn remote_vault_from_profile(
    explicit: Option<&str>,
) -> Result<Option<RemoteVault<SessionStore>>, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(explicit);
    let Some(profile) = config.profile(&profile_name) else {
        return Ok(None);
    };
    remote_vault_for_profile(&profile_name, profile)
}

/// Verify the passcode gate before any credential operation. A vault with
/// no passcode set is open.
pub fn require_unlocked(vault_path: &Path) -> Result<(), CliError> {
    let gate = PasscodeGate::new(open_kv(vault_path)?);
    if !gate.exists()? {
        return Ok(());
    }

    let passcode = match env::var("SAFEPASS_PASSCODE") {
        Ok(value) => value,
        Err(_) => prompt_secret("Passcode: ")?,
    };
    if gate.verify(&passcode)? {
        Ok(())
    } else {
        Err(CliError::PasscodeIncorrect)
    }
}

pub fn prompt_secret(label: &str) -> Result<String, CliError> {
    Ok(rpassword::prompt_password(label)?)
}

pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_credential_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyCredentialId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn find_by_id_prefix<'a>(
    records: &'a [CredentialRecord],
    query: &str,
) -> Result<&'a CredentialRecord, CliError> {
    if let Some(record) = records.iter().find(|record| record.id == query) {
        return Ok(record);
    }

    let matching: Vec<&CredentialRecord> = records
        .iter()
        .filter(|record| record.id.starts_with(query))
        .collect();

    match matching.len() {
        0 => Err(CliError::CredentialNotFound(query.to_string())),
        1 => Ok(matching[0]),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|record| record.id.chars().take(13).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousCredentialId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn credential_to_list_item(record: &CredentialRecord, reveal: bool) -> CredentialListItem {
    let now_ms = Utc::now().timestamp_millis();

    CredentialListItem {
        id: record.id.clone(),
        service: record.service.clone(),
        username: record.username.clone(),
        email: record.email.clone(),
        password: reveal.then(|| record.password.clone()),
        strength: password_strength(&record.password).to_string(),
        notes: record.notes.clone(),
        icon_url: service_icon_url(&record.service),
        created_at: record.created_at,
        updated_at: record.updated_at,
        relative_time: format_relative_time(record.updated_at, now_ms),
    }
}

pub fn format_credential_lines(records: &[CredentialRecord], reveal: bool) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    records
        .iter()
        .map(|record| {
            let short_id = record.id.chars().take(13).collect::<String>();
            let service = &record.service;
            let account = account_label(record);
            let relative_time = format_relative_time(record.updated_at, now_ms);

            if reveal {
                let password = &record.password;
                format!(
                    "{short_id:<13}  {service:<24}  {account:<28}  {password:<20}  {relative_time}"
                )
            } else {
                format!("{short_id:<13}  {service:<24}  {account:<28}  {relative_time}")
            }
        })
        .collect()
}

pub fn account_label(record: &CredentialRecord) -> String {
    if record.username.is_empty() {
        record.email.clone()
    } else {
        record.username.clone()
    }
}

pub fn print_records(
    records: &[CredentialRecord],
    as_json: bool,
    reveal: bool,
) -> Result<(), CliError> {
    if as_json {
        let json_items = records
            .iter()
            .map(|record| credential_to_list_item(record, reveal))
            .collect::<Vec<CredentialListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_credential_lines(records, reveal) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
