//! Data models for SafePass

mod credential;

pub use credential::{CredentialDraft, CredentialRecord};
