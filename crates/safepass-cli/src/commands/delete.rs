use std::path::Path;

use safepass_core::store::CredentialStore;

use crate::commands::common::{
    confirm, find_by_id_prefix, normalize_credential_identifier, open_controller, require_unlocked,
};
use crate::error::CliError;

pub async fn run_delete(
    id: &str,
    yes: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let normalized_id = normalize_credential_identifier(id)?;
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let backend = controller.backend().await;
    let records = backend.list().await?;
    let record = find_by_id_prefix(&records, &normalized_id)?;

    if !yes {
        let short_id = record.id.chars().take(13).collect::<String>();
        let prompt = format!("Delete '{}' ({short_id})?", record.service);
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    if backend.delete(&record.id).await? {
        println!("{}", record.id);
        Ok(())
    } else {
        Err(CliError::CredentialNotFound(record.id.clone()))
    }
}
