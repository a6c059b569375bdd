use std::path::Path;

use safepass_core::gate::PasscodeGate;
use safepass_core::kv::FileKeyValueStore;

use crate::cli::PasscodeCommands;
use crate::commands::common::{open_kv, prompt_secret};
use crate::error::CliError;

pub fn run_passcode(command: &PasscodeCommands, vault_path: &Path) -> Result<(), CliError> {
    let gate = PasscodeGate::new(open_kv(vault_path)?);

    match command {
        PasscodeCommands::Set => {
            verify_current_if_set(&gate)?;

            let new_passcode = prompt_secret("New passcode: ")?;
            let repeated = prompt_secret("Repeat passcode: ")?;
            if new_passcode != repeated {
                return Err(CliError::PasscodeMismatch);
            }

            gate.set_passcode(&new_passcode)?;
            println!("Passcode set");
        }
        PasscodeCommands::Clear => {
            if gate.exists()? {
                verify_current_if_set(&gate)?;
                gate.clear()?;
            }
            println!("Passcode cleared");
        }
    }

    Ok(())
}

fn verify_current_if_set(gate: &PasscodeGate<FileKeyValueStore>) -> Result<(), CliError> {
    if !gate.exists()? {
        return Ok(());
    }
    let current = prompt_secret("Current passcode: ")?;
    if gate.verify(&current)? {
        Ok(())
    } else {
        Err(CliError::PasscodeIncorrect)
    }
}
