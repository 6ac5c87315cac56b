//! Strongly-typed identifiers used across the domain.
//!
//! Unlike an event-sourced aggregate id, a [`TenantId`] is the literal basis
//! of shard routing (`id mod N`), so it is backed by `u64`, not a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Monotonic tenant identifier. The basis of shard routing (`id mod N`) and
/// of the per-tenant object suffix (`ToSuffix`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(u64);

impl TenantId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for TenantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for TenantId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<TenantId> for u64 {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl FromStr for TenantId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|e| CoreError::invalid_id(format!("TenantId: {e}")))?;
        Ok(Self(id))
    }
}

/// A validated shard index in `[0, ShardDivide)`.
///
/// Construction always goes through [`ShardIndex::new`], so a `ShardIndex`
/// in hand is a proof it was range-checked against the fan-out in force at
/// construction time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShardIndex(u16);

impl ShardIndex {
    pub fn new(index: u16, fan_out: u16) -> Result<Self, CoreError> {
        if index >= fan_out {
            return Err(CoreError::ShardOutOfRange(index as u64));
        }
        Ok(Self(index))
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_id_round_trips_through_str() {
        let id = TenantId::new(42);
        let parsed: TenantId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn shard_index_rejects_out_of_range() {
        assert!(ShardIndex::new(32, 32).is_err());
        assert!(ShardIndex::new(31, 32).is_ok());
    }
}
