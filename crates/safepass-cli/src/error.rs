use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] safepass_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Credential ID cannot be empty")]
    EmptyCredentialId,
    #[error("Credential not found for id/prefix: {0}")]
    CredentialNotFound(String),
    #[error("{0}")]
    AmbiguousCredentialId(String),
    #[error("Incorrect passcode")]
    PasscodeIncorrect,
    #[error("Passcodes did not match")]
    PasscodeMismatch,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("The cloud store did not accept the operation. Check `safepass sync status` and try again.")]
    CloudUnavailable,
    #[error(
        "Cloud sync is not configured. Run `safepass config init` with your Supabase project settings first."
    )]
    SyncNotConfigured,
}
