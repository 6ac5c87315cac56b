//! Keycode-suffix minting (`spec.md` §9 Design Notes).
//!
//! The source hard-codes `"suffix_test"` for consumer enqueues while vendor
//! dummies mint a random one. The spec requires the suffix to be minted
//! uniformly so polite vendor dequeue never depends on a client-known
//! constant — both [`crate::enqueue::enqueue`] and
//! [`crate::enqueue::enqueue_dummy`] call this.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LEN: usize = 6;

pub fn mint_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_fixed_length_alphanumeric_suffix() {
        let suffix = mint_suffix();
        assert_eq!(suffix.len(), LEN);
        assert!(suffix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }
}
