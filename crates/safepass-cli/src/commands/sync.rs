use std::path::Path;

use safepass_core::auth::SignUpOutcome;
use safepass_core::session::SyncMode;
use safepass_core::store::CredentialStore;

use crate::commands::common::{confirm, open_controller, prompt_secret, require_unlocked};
use crate::error::CliError;

/// Sign in (or sign up) against the configured Supabase project, then move
/// every local credential to the cloud. The local vault is cleared once the
/// migration pass finishes, whatever the per-record outcomes were.
pub async fn run_sync_enable(
    email: &str,
    password: Option<&str>,
    signup: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let Some(remote) = controller.remote() else {
        return Err(CliError::SyncNotConfigured);
    };

    if remote.current_session().await.is_none() {
        let password = match password {
            Some(value) => value.to_string(),
            None => prompt_secret("Account password: ")?,
        };

        if signup {
            let outcome = remote
                .auth()
                .sign_up(email, &password, None)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            if matches!(outcome, SignUpOutcome::ConfirmationRequired) {
                println!(
                    "Account created. Confirm your email, then run `safepass sync enable` again."
                );
                return Ok(());
            }
        } else {
            remote
                .auth()
                .sign_in(email, &password)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
        }
    }

    let Some(outcome) = controller.activate_cloud().await? else {
        return Err(CliError::Auth("no active cloud session".to_string()));
    };

    let session = controller.session().await;
    if let Some(identity) = session.identity {
        println!(
            "Cloud sync enabled for {}",
            identity.email.as_deref().unwrap_or(&identity.id)
        );
    }
    if outcome.attempted > 0 {
        println!(
            "Migrated {} of {} local credentials to the cloud",
            outcome.migrated, outcome.attempted
        );
    }
    Ok(())
}

pub async fn run_sync_disable(
    yes: bool,
    vault_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let controller = open_controller(vault_path, profile)?;
    let session = controller.session().await;
    if session.mode == SyncMode::LocalOnly {
        println!("Cloud sync is already disabled");
        return Ok(());
    }

    if !yes {
        let prompt =
            "Disable cloud sync? Credentials stay in the cloud; new changes go to the local vault.";
        if !confirm(prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    controller
        .deactivate_cloud()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;
    println!("Cloud sync disabled");
    Ok(())
}

pub async fn run_sync_status(vault_path: &Path, profile: Option<&str>) -> Result<(), CliError> {
    let controller = open_controller(vault_path, profile)?;
    let session = controller.session().await;

    match session.identity {
        Some(identity) => {
            println!("mode: cloud");
            println!("user: {}", identity.email.as_deref().unwrap_or(&identity.id));
        }
        None => {
            println!("mode: local");
            println!("local credentials: {}", controller.local().read_all().len());
        }
    }
    Ok(())
}

pub async fn run_sync_refresh(vault_path: &Path, profile: Option<&str>) -> Result<(), CliError> {
    require_unlocked(vault_path)?;

    let controller = open_controller(vault_path, profile)?;
    let backend = controller.backend().await;
    let records = backend.list().await?;
    println!(
        "Reloaded {} credentials from the {} store",
        records.len(),
        backend.label()
    );
    Ok(())
}
