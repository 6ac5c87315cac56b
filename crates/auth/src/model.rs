use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `Domain.accountType` — an account becomes `Vendor` only via `Upgrade`
/// (`spec.md` §3, §4.8); there is no downgrade operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Consumer = 0,
    Vendor = 1,
}

impl From<i16> for AccountType {
    fn from(value: i16) -> Self {
        if value == AccountType::Vendor as i16 {
            AccountType::Vendor
        } else {
            AccountType::Consumer
        }
    }
}

/// One row per tenant, on the master (`spec.md` §3).
#[derive(Debug, Clone, FromRow)]
pub struct Domain {
    pub id: i64,
    pub service_code: String,
    pub vendor_code: Vec<u8>,
    pub shard: i32,
    pub delete_flag: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// `shard == -1` is the upgrade-in-progress-or-not-started sentinel
    /// (`spec.md` §4.8, §5).
    pub const UNASSIGNED_SHARD: i32 = -1;

    pub fn is_vendor_bound(&self) -> bool {
        self.shard != Self::UNASSIGNED_SHARD
    }
}

/// One row per identity, on the master (`spec.md` §3).
#[derive(Debug, Clone, FromRow)]
pub struct AuthAccount {
    pub id: i64,
    pub identifier_type: String,
    pub platform_type: String,
    pub identifier: String,
    pub seed: Vec<u8>,
    pub ticks: i64,
    pub private_code: Vec<u8>,
    pub account_type: i16,
    pub session_id: Vec<u8>,
    pub session_private: Vec<u8>,
    pub session_footprint: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthAccount {
    pub fn account_type(&self) -> AccountType {
        AccountType::from(self.account_type)
    }
}
