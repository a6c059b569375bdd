//! safepass-core - Core library for SafePass
//!
//! This crate contains the credential model, the local and remote storage
//! backends, the sync mode controller, and the local-to-cloud migration
//! used by all SafePass interfaces.

pub mod auth;
pub mod error;
pub mod gate;
pub mod generator;
pub mod icons;
pub mod kv;
pub mod migrate;
pub mod models;
pub mod obfuscate;
pub mod remote;
pub mod session;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{CredentialDraft, CredentialRecord};
