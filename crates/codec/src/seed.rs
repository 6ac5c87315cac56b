//! Seed verification for account bootstrap (`spec.md` §4.1, §8 property 5).
//!
//! `base = HMAC-SHA256(identifier ∥ platform ∥ str(ticks), magic_key)`
//! `verify = HMAC-SHA256(base ∥ nonce, magic_key)`
//!
//! The request must supply `verify` as its `Seed` field.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CodecError;

type HmacSha256 = Hmac<Sha256>;

/// Derive the `verify` witness a correctly-seeded bootstrap request must send.
pub fn derive_seed(identifier: &str, platform: &str, ticks: i64, nonce: &str, magic_key: &[u8]) -> Vec<u8> {
    let base = hmac_once(magic_key, &[identifier.as_bytes(), platform.as_bytes(), ticks.to_string().as_bytes()]);
    hmac_once(magic_key, &[&base, nonce.as_bytes()])
}

/// Verify a request-supplied seed against the derived witness.
pub fn verify_seed(
    identifier: &str,
    platform: &str,
    ticks: i64,
    nonce: &str,
    magic_key: &[u8],
    supplied: &[u8],
) -> Result<(), CodecError> {
    let expected = derive_seed(identifier, platform, ticks, nonce, magic_key);
    if constant_time_eq(&expected, supplied) {
        Ok(())
    } else {
        Err(CodecError::SeedInvalid)
    }
}

/// Per-request HMAC proof used by the auth gate: `HMAC(session_private ∥ nonce, magic_key)`.
pub fn derive_request_hash(session_private: &[u8], nonce: &str, magic_key: &[u8]) -> Vec<u8> {
    hmac_once(magic_key, &[session_private, nonce.as_bytes()])
}

fn hmac_once(key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts a key of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_round_trip_succeeds() {
        let identifier = "57ea5c1f17211a2c384a05030a88fcace73d9d92bd1c714da5c68ede09847304";
        let platform = "Windows";
        let ticks = 1592619000;
        let nonce = "637295289927929882";
        let key = b"test-magic-key";

        let verify = derive_seed(identifier, platform, ticks, nonce, key);
        assert!(verify_seed(identifier, platform, ticks, nonce, key, &verify).is_ok());
    }

    #[test]
    fn bad_seed_is_rejected() {
        let key = b"test-magic-key";
        let result = verify_seed("id", "Windows", 1, "1", key, b"deadbeef");
        assert_eq!(result.unwrap_err(), CodecError::SeedInvalid);
    }
}
