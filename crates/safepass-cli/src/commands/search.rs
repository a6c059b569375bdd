use std::path::Path;

use safepass_core::store::CredentialStore;

use crate::commands::common::{
    normalize_search_query, open_controller, print_records, require_unlocked,
};
use crate::error::CliError;

pub async fn run_search(
    query: &str,
    as_json: bool,
    reveal: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let records = controller.backend().await.search(&normalized_query).await?;
    print_records(&records, as_json, reveal)
}
