//! Consumer `Cancel` (`spec.md` §4.7).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::{Code, UpdateOutcome};

/// Flip the caller's own row to `Cancelled` iff exactly one row is affected
/// — i.e. the `(queueCode, uid, keyCodePrefix)` triple names a row that is
/// still `Enqueued`. Anything else is [`QueueError::UserDequeueFailed`]
/// (`spec.md` §4.7).
#[instrument(skip(pool, queue_code), fields(tenant_id = %tenant_id))]
pub async fn cancel(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
    uid: TenantId,
    keycode_prefix: i64,
) -> Result<UpdateOutcome, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    let result = sqlx::query(&format!(
        "UPDATE queue_{suffix}
            SET status = 3, updated_at = now()
          WHERE queue_code = $1 AND uid = $2 AND keycode_prefix = $3
            AND status = 1 AND delete_flag = FALSE"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(uid.as_u64() as i64)
    .bind(keycode_prefix)
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        Ok(UpdateOutcome { updated: true })
    } else {
        Err(QueueError::UserDequeueFailed)
    }
}
