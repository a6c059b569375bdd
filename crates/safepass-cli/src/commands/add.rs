use std::path::Path;

use safepass_core::generator::{generate_password, password_strength, PasswordOptions};
use safepass_core::store::CredentialStore;
use safepass_core::CredentialDraft;

use crate::commands::common::{open_controller, prompt_secret, require_unlocked};
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub async fn run_add(
    service: &str,
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    notes: Option<&str>,
    generate: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    require_unlocked(vault_path)?;

    let password = if generate {
        generate_password(&PasswordOptions::default())
    } else if let Some(password) = password {
        password.to_string()
    } else {
        prompt_secret("Password: ")?
    };

    let draft = CredentialDraft {
        service: service.to_string(),
        username: username.unwrap_or_default().to_string(),
        email: email.unwrap_or_default().to_string(),
        password,
        notes: notes.unwrap_or_default().to_string(),
    };

    let controller = open_controller(vault_path, profile)?;
    let backend = controller.backend().await;
    let Some(record) = backend.create(&draft).await? else {
        return Err(CliError::CloudUnavailable);
    };

    println!("{}", record.id);
    if generate {
        eprintln!(
            "Generated a {} password for {}",
            password_strength(&record.password),
            record.service
        );
    }
    Ok(())
}
