//! SafePass CLI - Password management from the command line
//!
//! Local-first credential storage with optional Supabase-backed cloud sync.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands, ConfigCommands, SyncCommands};
use crate::commands::common::resolve_vault_path;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safepass=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let vault_path = resolve_vault_path(cli.vault_path);
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::Add {
            service,
            username,
            email,
            password,
            notes,
            generate,
        }) => {
            commands::add::run_add(
                &service,
                username.as_deref(),
                email.as_deref(),
                password.as_deref(),
                notes.as_deref(),
                generate,
                &vault_path,
                profile,
            )
            .await?;
        }
        Some(Commands::List { json, reveal }) => {
            commands::list::run_list(json, reveal, &vault_path, profile).await?;
        }
        Some(Commands::Search {
            query,
            json,
            reveal,
        }) => {
            commands::search::run_search(&query, json, reveal, &vault_path, profile).await?;
        }
        Some(Commands::Edit {
            id,
            service,
            username,
            email,
            password,
            prompt_password,
            notes,
        }) => {
            commands::edit::run_edit(
                &id,
                service.as_deref(),
                username.as_deref(),
                email.as_deref(),
                password.as_deref(),
                prompt_password,
                notes.as_deref(),
                &vault_path,
                profile,
            )
            .await?;
        }
        Some(Commands::Delete { id, yes }) => {
            commands::delete::run_delete(&id, yes, &vault_path, profile).await?;
        }
        Some(Commands::Generate {
            length,
            no_uppercase,
            no_numbers,
            no_symbols,
            check,
        }) => {
            commands::generate::run_generate(
                length,
                no_uppercase,
                no_numbers,
                no_symbols,
                check.as_deref(),
            )?;
        }
        Some(Commands::Passcode { command }) => {
            commands::passcode::run_passcode(&command, &vault_path)?;
        }
        Some(Commands::Theme { action }) => {
            commands::theme::run_theme(action, &vault_path)?;
        }
        Some(Commands::Sync { command }) => match command {
            SyncCommands::Enable {
                email,
                password,
                signup,
            } => {
                commands::sync::run_sync_enable(
                    &email,
                    password.as_deref(),
                    signup,
                    &vault_path,
                    profile,
                )
                .await?;
            }
            SyncCommands::Disable { yes } => {
                commands::sync::run_sync_disable(yes, &vault_path, profile).await?;
            }
            SyncCommands::Status => {
                commands::sync::run_sync_status(&vault_path, profile).await?;
            }
            SyncCommands::Refresh => {
                commands::sync::run_sync_refresh(&vault_path, profile).await?;
            }
        },
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init {
                profile: init_profile,
                supabase_url,
                supabase_anon_key,
                no_activate,
            } => {
                commands::config::run_config_init(
                    init_profile.as_deref().or(profile),
                    supabase_url,
                    supabase_anon_key,
                    no_activate,
                )?;
            }
        },
        Some(Commands::Completions { shell, output }) => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
