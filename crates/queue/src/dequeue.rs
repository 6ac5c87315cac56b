//! Vendor `Dequeue` (`spec.md` §4.7): polite (prefix+suffix) or force (prefix only).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::UpdateOutcome;

/// `force = true` updates by `keyCodePrefix` alone; `force = false` requires
/// the `(keyCodePrefix, keyCodeSuffix)` pair to match. A row count greater
/// than one is a consistency violation (at most one row can be `Enqueued`
/// for a given prefix, per the `(queueCode, keycodePrefix)` uniqueness
/// constraint) and rolls back as [`QueueError::QueryConsistencyViolation`].
/// Zero rows means nothing to dequeue — the caller still reports success
/// with `updated = false` (`spec.md` §4.7).
#[instrument(skip(pool, keycode_suffix), fields(tenant_id = %tenant_id))]
pub async fn dequeue(
    pool: &PgPool,
    tenant_id: TenantId,
    force: bool,
    keycode_prefix: i64,
    keycode_suffix: Option<&str>,
) -> Result<UpdateOutcome, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    let result = if force {
        sqlx::query(&format!(
            "UPDATE queue_{suffix}
                SET status = 2, updated_at = now()
              WHERE keycode_prefix = $1 AND status = 1 AND delete_flag = FALSE"
        ))
        .bind(keycode_prefix)
        .execute(pool)
        .await?
    } else {
        let suffix_value = keycode_suffix.unwrap_or_default();
        sqlx::query(&format!(
            "UPDATE queue_{suffix}
                SET status = 2, updated_at = now()
              WHERE keycode_prefix = $1 AND keycode_suffix = $2
                AND status = 1 AND delete_flag = FALSE"
        ))
        .bind(keycode_prefix)
        .bind(suffix_value)
        .execute(pool)
        .await?
    };

    match result.rows_affected() {
        0 => Ok(UpdateOutcome { updated: false }),
        1 => Ok(UpdateOutcome { updated: true }),
        n => Err(QueueError::QueryConsistencyViolation(n)),
    }
}
