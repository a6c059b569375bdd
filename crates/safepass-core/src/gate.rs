//! Local passcode gate.
//!
//! A single stored secret gating access to the credential store. The stored
//! form is a trivial reversible base64 encoding compared byte-for-byte. It
//! is NOT a cryptographic hash, and there is no lockout, rate limiting, or
//! rotation. A production-grade gate should replace the encoding with a
//! salted one-way function; the contract (`set_passcode`, `verify`,
//! `exists`, `clear`) would be unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{Error, Result};
use crate::kv::{KeyValueStore, PASSCODE_KEY};

pub struct PasscodeGate<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> PasscodeGate<K> {
    pub const fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Store a new passcode, replacing any existing one.
    pub fn set_passcode(&self, passcode: &str) -> Result<()> {
        if passcode.is_empty() {
            return Err(Error::Validation("passcode must not be empty".to_string()));
        }
        self.kv.set(PASSCODE_KEY, &BASE64.encode(passcode))
    }

    /// Compare a candidate passcode against the stored one. `false` when no
    /// passcode has been set up.
    pub fn verify(&self, passcode: &str) -> Result<bool> {
        let Some(stored) = self.kv.get(PASSCODE_KEY)? else {
            return Ok(false);
        };
        Ok(BASE64.encode(passcode) == stored)
    }

    /// Whether passcode setup has occurred.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.kv.get(PASSCODE_KEY)?.is_some())
    }

    /// Remove the stored passcode.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(PASSCODE_KEY)
    }
}
