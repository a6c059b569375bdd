use std::path::Path;

use safepass_core::store::CredentialStore;

use crate::commands::common::{open_controller, print_records, require_unlocked};
use crate::error::CliError;

pub async fn run_list(
    as_json: bool,
    reveal: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let records = controller.backend().await.list().await?;
    print_records(&records, as_json, reveal)
}
