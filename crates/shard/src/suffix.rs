//! Pure shard-index and per-tenant object-suffix arithmetic (`spec.md` §4.3).
//!
//! Kept free of any DB handle so it is trivially unit-testable and so the
//! schema provisioner can validate a suffix before splicing it into DDL.

use vql_core::TenantId;

/// Fixed shard fan-out (`N` in `spec.md`).
pub const SHARD_DIVIDE: u16 = 32;

/// `shardOf(id) = id mod N`.
pub fn shard_of(tenant_id: TenantId) -> u16 {
    (tenant_id.as_u64() % SHARD_DIVIDE as u64) as u16
}

/// Format the 16 hex-digit suffix used to name per-tenant objects
/// (`summary_<h>`, `queue_<h>`, ...). Matches the original's `%016x`.
pub fn to_suffix(tenant_id: TenantId) -> String {
    format!("{:016x}", tenant_id.as_u64())
}

/// Validate a suffix before it is spliced into any dynamic SQL identifier.
///
/// This is the re-design from `spec.md` §9 Design Notes: the hex suffix is
/// the *only* dynamic segment in generated DDL, and it is always produced
/// by [`to_suffix`] — but anything that accepts a suffix from outside this
/// crate (e.g. deserialized from a request) must run it through this check
/// first.
pub fn validate_suffix(suffix: &str) -> bool {
    suffix.len() == 16 && suffix.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_of_wraps_at_divide() {
        assert_eq!(shard_of(TenantId::new(0)), 0);
        assert_eq!(shard_of(TenantId::new(32)), 0);
        assert_eq!(shard_of(TenantId::new(33)), 1);
        assert_eq!(shard_of(TenantId::new(63)), 31);
    }

    #[test]
    fn suffix_is_sixteen_lowercase_hex_digits() {
        let suffix = to_suffix(TenantId::new(255));
        assert_eq!(suffix, "00000000000000ff");
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn validate_suffix_rejects_anything_not_sixteen_lowercase_hex_digits() {
        assert!(validate_suffix(&to_suffix(TenantId::new(9999))));
        assert!(!validate_suffix("00000000000000FF"));
        assert!(!validate_suffix("not-a-suffix"));
        assert!(!validate_suffix("abc"));
    }
}
