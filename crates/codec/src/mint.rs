//! Opaque code minting (`spec.md` §4.1, §8 property 4).
//!
//! A 32-byte code is `SHA3-256(16 random bytes)`. A session id is
//! `SHA3-256(process_session_seed ∥ private_code)`. Collision resistance
//! comes from the 128 bits of entropy in the random seed, not from the hash.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use sha3::{Digest, Sha3_256};

use crate::error::CodecError;

/// A minted 32-byte opaque code (vendor code, queue code, private code, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code(pub [u8; 32]);

impl Code {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Standard base64, the wire representation of every opaque code field
    /// (`vendorCode`, `privateCode`, `sessionId`, `queueCode`, ...).
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Decode a base64 opaque code back into its raw 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, CodecError> {
        let raw = BASE64.decode(encoded.as_bytes()).map_err(|_| CodecError::EncodeInvalid)?;
        let bytes: [u8; 32] = raw.try_into().map_err(|_| CodecError::EncodeInvalid)?;
        Ok(Self(bytes))
    }
}

/// Mint a fresh opaque code from 16 bytes of randomness.
pub fn mint_code() -> Code {
    let mut entropy = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut entropy);
    mint_code_from_entropy(&entropy)
}

fn mint_code_from_entropy(entropy: &[u8; 16]) -> Code {
    let mut hasher = Sha3_256::new();
    hasher.update(entropy);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Code(out)
}

/// Derive a session id from the process-wide session seed and an account's
/// private code. Deterministic given the same seed: session ids should be
/// treated as opaque and never reconstructed outside of `vql-auth`
/// (`spec.md` §9 Design Notes).
pub fn session_id_for(process_session_seed: &[u8], private_code: &[u8; 32]) -> Code {
    let mut hasher = Sha3_256::new();
    hasher.update(process_session_seed);
    hasher.update(private_code);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Code(out)
}

/// Mint a fresh per-session HMAC key (`sessionPrivate`): `SHA3-256(16 random bytes)`.
pub fn random_session_private() -> Code {
    mint_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_codes_do_not_collide_across_many_trials() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let code = mint_code();
            assert!(seen.insert(code.0), "minted code collided");
        }
    }

    #[test]
    fn session_id_is_deterministic_given_the_same_inputs() {
        let seed = b"process-seed";
        let private_code = [7u8; 32];
        let a = session_id_for(seed, &private_code);
        let b = session_id_for(seed, &private_code);
        assert_eq!(a, b);
    }

    #[test]
    fn session_id_changes_with_seed() {
        let private_code = [7u8; 32];
        let a = session_id_for(b"seed-a", &private_code);
        let b = session_id_for(b"seed-b", &private_code);
        assert_ne!(a, b);
    }

    #[test]
    fn base64_round_trips() {
        let code = mint_code();
        let encoded = code.to_base64();
        assert_eq!(Code::from_base64(&encoded).unwrap(), code);
    }

    #[test]
    fn base64_decode_rejects_wrong_length() {
        assert!(Code::from_base64("YWJj").is_err());
    }
}
