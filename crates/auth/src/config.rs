//! Process-wide secrets and timeouts the identity store and auth gate need
//! (`spec.md` §6: `MagicKey`, `SessionSeed`, `VendorSeed`, `SessionTimeout`).

use chrono::Duration;

/// Loaded once at process startup (`vql-api`'s `AppConfig`) and handed down
/// by reference; nothing in this crate reads the environment directly.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC pepper for seed verification and the per-request proof.
    pub magic_key: Vec<u8>,
    /// Session-id derivation input for consumer accounts.
    pub session_seed: Vec<u8>,
    /// Session-id derivation input used once an account has upgraded to
    /// vendor. The source derives every session id from one process seed;
    /// splitting it by account type (an Open Question left undecided by
    /// `spec.md` §6) keeps a vendor's re-logon session unlinkable from its
    /// pre-upgrade consumer sessions without changing the derivation shape.
    pub vendor_seed: Vec<u8>,
    /// Idle-timeout window for `sessionFootprint` (`spec.md` §4.6, §8 property 8).
    pub session_timeout: Duration,
}

impl AuthConfig {
    pub fn session_seed_for(&self, account_type: crate::model::AccountType) -> &[u8] {
        match account_type {
            crate::model::AccountType::Consumer => &self.session_seed,
            crate::model::AccountType::Vendor => &self.vendor_seed,
        }
    }
}
