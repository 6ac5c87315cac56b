//! `Upgrade` — the three-transaction protocol (`spec.md` §4.8).
//!
//! T1 and T3 are `vql-auth`'s (`begin_upgrade`/`complete_upgrade`); this
//! function owns T2 (schema provisioning + first queue) and the
//! orchestration between all three. Failure between T2 and T3 leaves a
//! usable shard and an unset `Domain.shard`; a reconciler (an operational
//! collaborator outside this crate's scope) can complete T3 later by
//! recomputing `shardOf(id)`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{shard_of, to_suffix, validate_suffix};

use crate::error::TenantError;
use crate::model::UpgradeOutcome;

#[instrument(skip(master_pool, shard_pool), fields(tenant_id = %tenant_id))]
pub async fn upgrade(
    master_pool: &PgPool,
    shard_pool: &PgPool,
    tenant_id: TenantId,
    now: DateTime<Utc>,
    name: &str,
    caption: &str,
    require_admit: bool,
) -> Result<UpgradeOutcome, TenantError> {
    // T1: mint vendorCode, shard stays -1 until T3.
    let vendor_code = vql_auth::begin_upgrade(master_pool, tenant_id, now).await?;

    // T2: provision schema, apply the requested admit policy, mint the
    // first queue — all in one shard transaction.
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(TenantError::Queue(vql_queue::QueueError::InvalidSuffix));
    }

    let mut tx = shard_pool.begin().await?;
    vql_schema::provision(&mut tx, tenant_id, name, caption).await?;

    sqlx::query(&format!(
        "UPDATE summary_{suffix} SET require_admit = $1 WHERE id = 1"
    ))
    .bind(require_admit)
    .execute(&mut *tx)
    .await?;

    let init = vql_queue::init_queue(&mut tx, tenant_id, true).await?;
    tx.commit().await?;

    // T3: bind the shard index, flip the account to vendor.
    let shard_index = shard_of(tenant_id);
    vql_auth::complete_upgrade(master_pool, tenant_id, shard_index, now).await?;

    Ok(UpgradeOutcome {
        vendor_code,
        queue_code: init.queue_code,
    })
}
