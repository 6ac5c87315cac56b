//! Auth gate (component C6, `spec.md` §4.6).
//!
//! The only place a tenant identity is established from a request. Every
//! authenticated handler calls [`authenticate`] first and trusts the
//! returned `TenantId` afterward — nothing downstream re-checks the session.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vql_codec::{derive_request_hash, Code};
use vql_core::TenantId;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate `Session`/`Nonce`/`Hash` and refresh the session footprint.
///
/// Steps (`spec.md` §4.6):
/// 1. Select `id, session_private` where `session_id = session` and the
///    footprint is still within the idle-timeout window, evaluated against
///    `now` rather than the database's own clock so idle-timeout behavior
///    is deterministically testable (`spec.md` §8 property 8).
/// 2. Zero rows → [`AuthError::UserAuthNotFound`]; more than one → a
///    consistency violation, [`AuthError::UserAuthFailed`].
/// 3. Recompute `HMAC(session_private ∥ nonce, magic_key)` and compare to
///    the supplied hash.
/// 4. Refresh `session_footprint` to `now` and commit.
///
/// The caller (`vql-api`) is responsible for collapsing any `Err` here to
/// `SecSquashed` on the wire; this function always returns the true cause
/// so it can still be logged (`spec.md` §4.6, §7).
#[instrument(skip(pool, cfg, hash))]
pub async fn authenticate(
    pool: &PgPool,
    cfg: &AuthConfig,
    now: DateTime<Utc>,
    session: Code,
    nonce: &str,
    hash: &[u8],
) -> Result<TenantId, AuthError> {
    let cutoff = now - cfg.session_timeout;

    let mut tx = pool.begin().await?;

    let rows: Vec<(i64, Vec<u8>)> = sqlx::query_as(
        "SELECT id, session_private FROM auth_account
          WHERE session_id = $1 AND session_footprint > $2
          FOR UPDATE",
    )
    .bind(session.as_bytes().as_slice())
    .bind(cutoff)
    .fetch_all(&mut *tx)
    .await?;

    let (tenant_id, session_private) = match rows.as_slice() {
        [] => return Err(AuthError::UserAuthNotFound),
        [single] => single.clone(),
        _ => return Err(AuthError::UserAuthFailed),
    };

    let expected = derive_request_hash(&session_private, nonce, &cfg.magic_key);
    if !constant_time_eq(&expected, hash) {
        return Err(AuthError::UserAuthFailed);
    }

    sqlx::query("UPDATE auth_account SET session_footprint = $2 WHERE id = $1")
        .bind(tenant_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(TenantId::new(tenant_id as u64))
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
    fn constant_time_eq_rejects_mismatched_length() {
        assert!(!constant_time_eq(b"abc", b"ab"));
    }

    #[test]
    fn constant_time_eq_accepts_equal_slices() {
        assert!(constant_time_eq(b"abc", b"abc"));
    }
}
