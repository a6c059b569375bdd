use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pretty_assertions::assert_eq;
use safepass_core::kv::{FileKeyValueStore, KeyValueStore, THEME_KEY};
use safepass_core::CredentialRecord;

use crate::cli::{CompletionShell, ThemeAction};
use crate::commands::common::{
    account_label, credential_to_list_item, find_by_id_prefix, format_credential_lines,
    format_relative_time, is_affirmative, normalize_credential_identifier, normalize_search_query,
    resolve_vault_path,
};
use crate::commands::completions::run_completions;
use crate::commands::theme::{next_theme, run_theme, theme_is_dark};
use crate::error::CliError;

fn record(id: &str, service: &str) -> CredentialRecord {
    CredentialRecord {
        id: id.to_string(),
        service: service.to_string(),
        username: "octocat".to_string(),
        email: String::new(),
        password: "Abcdef12!Abcdef1".to_string(),
        notes: String::new(),
        created_at: 1000,
        updated_at: 1000,
    }
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
}

#[test]
fn normalize_search_query_rejects_empty() {
    assert!(normalize_search_query(" \n\t ").is_err());
    assert_eq!(
        normalize_search_query("  exact phrase  ").unwrap(),
        "exact phrase"
    );
}

#[test]
fn normalize_credential_identifier_rejects_empty() {
    assert!(matches!(
        normalize_credential_identifier(" \n "),
        Err(CliError::EmptyCredentialId)
    ));
    assert_eq!(
        normalize_credential_identifier("  abc123  ").unwrap(),
        "abc123".to_string()
    );
}

#[test]
fn is_affirmative_accepts_y_and_yes() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative("  YES "));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative(""));
}

#[test]
fn find_by_id_prefix_supports_exact_and_prefix_id() {
    let records = vec![
        record("11111111-1111-7111-8111-111111111111", "Left"),
        record("11111111-1111-7111-8111-222222222222", "Right"),
    ];

    let by_exact = find_by_id_prefix(&records, "11111111-1111-7111-8111-111111111111").unwrap();
    assert_eq!(by_exact.service, "Left");

    let by_prefix = find_by_id_prefix(&records, "11111111-1111-7111-8111-2").unwrap();
    assert_eq!(by_prefix.service, "Right");
}

#[test]
fn find_by_id_prefix_rejects_ambiguous_prefix() {
    let records = vec![
        record("aaaaaaaa-aaaa-7aaa-8aaa-aaaaaaaaaaaa", "Left"),
        record("aaaaaaaa-aaaa-7aaa-8aaa-bbbbbbbbbbbb", "Right"),
    ];

    let error = find_by_id_prefix(&records, "aaaaaaaa-aaaa-7aaa-8aaa").unwrap_err();
    assert!(matches!(error, CliError::AmbiguousCredentialId(_)));
}

#[test]
fn find_by_id_prefix_rejects_missing_credential() {
    let records = vec![record("aaaaaaaa-aaaa-7aaa-8aaa-aaaaaaaaaaaa", "Only")];

    let error = find_by_id_prefix(&records, "does-not-exist").unwrap_err();
    assert!(matches!(error, CliError::CredentialNotFound(_)));
}

#[test]
fn credential_list_item_hides_password_unless_revealed() {
    let record = record("id-1", "GitHub");

    let hidden = credential_to_list_item(&record, false);
    assert!(hidden.password.is_none());
    assert_eq!(hidden.strength, "strong");
    assert_eq!(
        hidden.icon_url,
        "https://www.google.com/s2/favicons?domain=github.com&sz=64"
    );

    let revealed = credential_to_list_item(&record, true);
    assert_eq!(revealed.password.as_deref(), Some("Abcdef12!Abcdef1"));
}

#[test]
fn format_credential_lines_masks_passwords_by_default() {
    let records = vec![record("id-1", "GitHub")];

    let lines = format_credential_lines(&records, false);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("GitHub"));
    assert!(lines[0].contains("octocat"));
    assert!(!lines[0].contains("Abcdef12!Abcdef1"));

    let revealed = format_credential_lines(&records, true);
    assert!(revealed[0].contains("Abcdef12!Abcdef1"));
}

#[test]
fn account_label_prefers_username() {
    let mut credential = record("id-1", "GitHub");
    assert_eq!(account_label(&credential), "octocat");

    credential.username = String::new();
    credential.email = "person@example.com".to_string();
    assert_eq!(account_label(&credential), "person@example.com");
}

#[test]
fn theme_transitions() {
    assert!(!theme_is_dark(None));
    assert!(!theme_is_dark(Some("false")));
    assert!(theme_is_dark(Some("true")));

    assert!(next_theme(false, ThemeAction::Toggle));
    assert!(!next_theme(true, ThemeAction::Toggle));
    assert!(next_theme(false, ThemeAction::Dark));
    assert!(!next_theme(true, ThemeAction::Light));
    assert!(next_theme(true, ThemeAction::Show));
}

#[test]
fn run_theme_persists_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let vault_path = dir.path().join("vault.json");

    run_theme(ThemeAction::Toggle, &vault_path).unwrap();
    let kv = FileKeyValueStore::new(&vault_path);
    assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("true"));

    run_theme(ThemeAction::Toggle, &vault_path).unwrap();
    let kv = FileKeyValueStore::new(&vault_path);
    assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("false"));
}

#[test]
fn resolve_vault_path_prefers_explicit_path() {
    let explicit = PathBuf::from("/tmp/custom-vault.json");
    assert_eq!(resolve_vault_path(Some(explicit.clone())), explicit);
}

#[test]
fn run_completions_writes_bash_script_file() {
    let output_path = std::env::temp_dir().join(format!(
        "safepass-completions-test-{}.bash",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_safepass()"));
    assert!(script.contains("complete -F _safepass"));

    let _ = std::fs::remove_file(output_path);
}
