//! Player identity and secret handling.
//!
//! Ids and secrets are opaque 32-hex-char tokens (128 bits) drawn from the
//! operating system's random source. Secret comparison goes through SHA-256
//! digests so it does not short-circuit on the first differing byte.

use sha2::{Digest, Sha256};

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    // OS entropy failure is unrecoverable; nothing sensible to degrade to.
    getrandom::getrandom(&mut buf).expect("OS random source unavailable");
    hex::encode(buf)
}

/// A fresh opaque player id.
pub fn new_player_id() -> String {
    random_hex(16)
}

/// A fresh player secret, 128 bits of entropy.
pub fn new_secret() -> String {
    random_hex(16)
}

/// Compare an expected secret against a provided one.
pub fn secrets_match(expected: &str, provided: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(provided.as_bytes())
}
