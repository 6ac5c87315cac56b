//! Master-side halves of the three-transaction vendor upgrade protocol
//! (`spec.md` §4.8). `vql-auth` owns T1 and T3; `vql-tenant` owns T2 (schema
//! provisioning + first queue) and the orchestration between all three, so
//! that this crate never depends on `vql-schema` or `vql-queue`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vql_codec::{mint_code, Code};
use vql_core::TenantId;

use crate::error::AuthError;
use crate::model::AccountType;

/// T1: verify the account exists, mint a `vendorCode`, and set it on
/// `Domain`. `shard` stays `-1` until T3 commits — that sentinel is the
/// crash-recovery signal described in `spec.md` §4.8.
#[instrument(skip(pool))]
pub async fn begin_upgrade(pool: &PgPool, tenant_id: TenantId, now: DateTime<Utc>) -> Result<Code, AuthError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM auth_account WHERE id = $1 AND delete_flag = FALSE)",
    )
    .bind(tenant_id.as_u64() as i64)
    .fetch_one(pool)
    .await?;
    if !exists {
        return Err(AuthError::AccountInvalid);
    }

    let vendor_code = mint_code();

    sqlx::query("UPDATE domain SET vendor_code = $2, updated_at = $3 WHERE id = $1")
        .bind(tenant_id.as_u64() as i64)
        .bind(vendor_code.as_bytes().as_slice())
        .bind(now)
        .execute(pool)
        .await?;

    Ok(vendor_code)
}

/// T3: bind the shard index and flip the account to vendor. Only called
/// after T2 (schema provisioning) has committed.
#[instrument(skip(pool))]
pub async fn complete_upgrade(
    pool: &PgPool,
    tenant_id: TenantId,
    shard_index: u16,
    now: DateTime<Utc>,
) -> Result<(), AuthError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE domain SET shard = $2, updated_at = $3 WHERE id = $1")
        .bind(tenant_id.as_u64() as i64)
        .bind(shard_index as i32)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE auth_account SET account_type = $2, updated_at = $3 WHERE id = $1")
        .bind(tenant_id.as_u64() as i64)
        .bind(AccountType::Vendor as i16)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Resolve a tenant id from its base64 `vendorCode`, for the consumer-facing
/// enqueue/show-queue paths (`spec.md` §4.7 step 1). Returns `None` if no
/// domain row carries that code, or if the upgrade is still in progress
/// (`shard == -1`): a caller must not route to a shard that may not exist yet.
#[instrument(skip(pool, vendor_code))]
pub async fn resolve_vendor(pool: &PgPool, vendor_code: Code) -> Result<Option<TenantId>, AuthError> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM domain WHERE vendor_code = $1 AND shard >= 0 AND delete_flag = FALSE",
    )
    .bind(vendor_code.as_bytes().as_slice())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id,)| TenantId::new(id as u64)))
}
