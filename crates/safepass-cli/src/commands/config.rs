use crate::config_profiles::{is_http_url, normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config_init(
    profile: Option<&str>,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    if let Some(url) = supabase_url.as_deref() {
        if !url.trim().is_empty() && !is_http_url(url) {
            return Err(CliError::Config(format!(
                "Supabase URL must start with http:// or https://: {url}"
            )));
        }
    }

    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile);

    let entry = config.profile_mut_or_default(&profile_name);
    if let Some(url) = normalize_text_option(supabase_url) {
        entry.supabase_url = Some(url);
    }
    if let Some(key) = normalize_text_option(supabase_anon_key) {
        entry.supabase_anon_key = Some(key);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Profile '{profile_name}' saved to {}", path.display());
    Ok(())
}
