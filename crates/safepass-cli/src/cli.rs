use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "safepass")]
#[command(about = "Local-first password manager with optional cloud sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local vault file
    #[arg(long, value_name = "PATH")]
    pub vault_path: Option<PathBuf>,

    /// CLI profile name for cloud sync configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a new credential
    #[command(alias = "new")]
    Add {
        /// Service or website name
        service: String,
        /// Account username
        #[arg(short, long, value_name = "NAME")]
        username: Option<String>,
        /// Account email
        #[arg(short, long, value_name = "EMAIL")]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        /// Optional free-form notes
        #[arg(long, value_name = "TEXT")]
        notes: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },
    /// List stored credentials
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Include passwords in the output
        #[arg(long)]
        reveal: bool,
    },
    /// Search credentials by service, username, or email
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Include passwords in the output
        #[arg(long)]
        reveal: bool,
    },
    /// Edit an existing credential
    Edit {
        /// Credential ID or unique ID prefix
        id: String,
        /// New service name
        #[arg(long, value_name = "NAME")]
        service: Option<String>,
        /// New username
        #[arg(long, value_name = "NAME")]
        username: Option<String>,
        /// New email
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,
        /// New password (set to prompt interactively with --prompt-password)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        /// Prompt for the new password without echoing
        #[arg(long)]
        prompt_password: bool,
        /// New notes
        #[arg(long, value_name = "TEXT")]
        notes: Option<String>,
    },
    /// Delete an existing credential
    Delete {
        /// Credential ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long, default_value = "16")]
        length: usize,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude numbers
        #[arg(long)]
        no_numbers: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
        /// Score an existing password instead of generating one
        #[arg(long, value_name = "PASSWORD")]
        check: Option<String>,
    },
    /// Manage the local passcode gate
    Passcode {
        #[command(subcommand)]
        command: PasscodeCommands,
    },
    /// Show or change the color theme
    Theme {
        /// Theme action
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
    /// Manage cloud sync
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PasscodeCommands {
    /// Set or replace the passcode
    Set,
    /// Remove the passcode
    Clear,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Sign in (or sign up) and migrate local credentials to the cloud
    Enable {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        /// Create a new account instead of signing in
        #[arg(long)]
        signup: bool,
    },
    /// Sign out and return to local-only storage
    Disable {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show the current sync mode and identity
    Status,
    /// Reload credentials from the active backend
    Refresh,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
