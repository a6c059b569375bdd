use std::path::Path;

use safepass_core::store::CredentialStore;

use crate::commands::common::{
    find_by_id_prefix, normalize_credential_identifier, open_controller, prompt_secret,
    require_unlocked,
};
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub async fn run_edit(
    id: &str,
    service: Option<&str>,
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    prompt_password: bool,
    notes: Option<&str>,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let normalized_id = normalize_credential_identifier(id)?;
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let backend = controller.backend().await;
    let records = backend.list().await?;
    let record = find_by_id_prefix(&records, &normalized_id)?;

    let mut draft = record.to_draft();
    if let Some(service) = service {
        draft.service = service.to_string();
    }
    if let Some(username) = username {
        draft.username = username.to_string();
    }
    if let Some(email) = email {
        draft.email = email.to_string();
    }
    if prompt_password {
        draft.password = prompt_secret("New password: ")?;
    } else if let Some(password) = password {
        draft.password = password.to_string();
    }
    if let Some(notes) = notes {
        draft.notes = notes.to_string();
    }

    let Some(updated) = backend.update(&record.id, &draft).await? else {
        return Err(CliError::CredentialNotFound(record.id.clone()));
    };

    println!("{}", updated.id);
    Ok(())
}
