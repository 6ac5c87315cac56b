//! `ShowQueue` (`spec.md` §4.7).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::{Code, QueueStatus, ShowQueueOutcome};

/// Resolve the caller's row for `(queueCode, uid)` and, when still waiting,
/// recompute the position counts.
#[instrument(skip(pool, queue_code), fields(tenant_id = %tenant_id))]
pub async fn show_queue(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
    uid: TenantId,
) -> Result<ShowQueueOutcome, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    let row: Option<(i64, i16)> = sqlx::query_as(&format!(
        "SELECT id, status FROM queue_{suffix}
          WHERE queue_code = $1 AND uid = $2 AND delete_flag = FALSE
          ORDER BY id DESC LIMIT 1"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(uid.as_u64() as i64)
    .fetch_optional(pool)
    .await?;

    let (row_id, status_raw) = row.ok_or(QueueError::KeyCodeCodeNotfound)?;
    let status = QueueStatus::from_i16(status_raw).ok_or(QueueError::KeyCodeCodeNotfound)?;

    if !matches!(status, QueueStatus::Enqueued) {
        return Ok(ShowQueueOutcome {
            status,
            persons_waiting_before: None,
            total_waiting: None,
        });
    }

    let persons_waiting_before: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND status = 1 AND delete_flag = FALSE AND id < $2"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(row_id)
    .fetch_one(pool)
    .await?;

    let total_waiting: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND status = 1 AND delete_flag = FALSE"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .fetch_one(pool)
    .await?;

    Ok(ShowQueueOutcome {
        status,
        persons_waiting_before: Some(persons_waiting_before),
        total_waiting: Some(total_waiting),
    })
}
