use std::path::Path;

use safepass_core::kv::{KeyValueStore, THEME_KEY};

use crate::cli::ThemeAction;
use crate::commands::common::open_kv;
use crate::error::CliError;

pub fn run_theme(action: ThemeAction, vault_path: &Path) -> Result<(), CliError> {
    let kv = open_kv(vault_path)?;
    let dark = theme_is_dark(kv.get(THEME_KEY)?.as_deref());
    let next = next_theme(dark, action);

    if action != ThemeAction::Show {
        kv.set(THEME_KEY, if next { "true" } else { "false" })?;
    }

    println!("{}", if next { "dark" } else { "light" });
    Ok(())
}

pub fn theme_is_dark(stored: Option<&str>) -> bool {
    stored == Some("true")
}

pub const fn next_theme(dark: bool, action: ThemeAction) -> bool {
    match action {
        ThemeAction::Show => dark,
        ThemeAction::Dark => true,
        ThemeAction::Light => false,
        ThemeAction::Toggle => !dark,
    }
}
