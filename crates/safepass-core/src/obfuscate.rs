//! Reversible obfuscation for the local credential blob.
//!
//! This is a byte-wise XOR against a fixed repeating key followed by base64
//! encoding. It is NOT cryptographic protection; it only keeps the blob from
//! being casually readable on disk. Anything substituting a real cipher must
//! keep the same contract: full-blob round-trip, `None` on any decode failure.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

const OBFUSCATION_KEY: &[u8] = b"safepass_master";

/// Obfuscate plaintext for storage.
#[must_use]
pub fn obfuscate(plaintext: &str) -> String {
    BASE64.encode(xor_with_key(plaintext.as_bytes()))
}

/// Reverse [`obfuscate`]. Returns `None` when the payload is not valid
/// base64 or the unmasked bytes are not valid UTF-8.
#[must_use]
pub fn deobfuscate(encoded: &str) -> Option<String> {
    let masked = BASE64.decode(encoded).ok()?;
    String::from_utf8(xor_with_key(&masked)).ok()
}

fn xor_with_key(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(OBFUSCATION_KEY.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}
