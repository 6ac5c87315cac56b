//! Vendor `Manage` — paginated keycode listing with totals (`spec.md` §4.7).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::{Code, ManageEntry, ManagePage, QueueStatus};

const PAGE_SIZE: i64 = 20;

/// Page `page` (0-indexed) of this vendor's current queue incarnation,
/// with `total` (excluding cancelled) and `queuingTotal` (still waiting).
#[instrument(skip(pool, queue_code), fields(tenant_id = %tenant_id))]
pub async fn manage(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
    page: i64,
) -> Result<ManagePage, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    let offset = page.max(0) * PAGE_SIZE;

    let rows: Vec<(i64, String, i16)> = sqlx::query_as(&format!(
        "SELECT keycode_prefix, keycode_suffix, status FROM queue_{suffix}
          WHERE queue_code = $1 AND delete_flag = FALSE
          ORDER BY id ASC
          LIMIT $2 OFFSET $3"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .into_iter()
        .filter_map(|(prefix, suffix, status_raw)| {
            QueueStatus::from_i16(status_raw).map(|status| ManageEntry {
                keycode_prefix: prefix,
                keycode_suffix: suffix,
                status,
            })
        })
        .collect();

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND delete_flag = FALSE AND status != 3"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .fetch_one(pool)
    .await?;

    let queuing_total: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND delete_flag = FALSE AND status = 1"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .fetch_one(pool)
    .await?;

    Ok(ManagePage {
        entries,
        total,
        queuing_total,
    })
}
