//! `Enqueue` / `EnqueueDummy` (`spec.md` §4.7).
//!
//! Both mint a `keycodePrefix` via the tenant's `nextseq_<h>` stored
//! function and a random `keycodeSuffix` (`suffix_mint::mint_suffix`), then
//! insert one `Enqueued` row and recompute position counts within the same
//! transaction — so the returned counts match the insertion's commit-time
//! read snapshot (`spec.md` §5).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::{Code, EnqueueOutcome};
use crate::suffix_mint::mint_suffix;

/// Consumer-initiated enqueue (`spec.md` §4.7 steps 1-7).
#[instrument(skip(pool, queue_code), fields(tenant_id = %tenant_id))]
pub async fn enqueue(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
    uid: TenantId,
) -> Result<EnqueueOutcome, QueueError> {
    insert_and_observe(pool, tenant_id, queue_code, uid, mint_suffix(), true).await
}

/// Vendor-initiated dummy enqueue, owned by the vendor itself
/// (`spec.md` §4.7: "the vendor's own uid as owner"). Shares the same
/// insertion path as [`enqueue`], but does not enforce the single-live-row
/// invariant: the vendor's own uid is expected to accumulate many rows as
/// dummies are minted.
#[instrument(skip(pool, queue_code), fields(tenant_id = %tenant_id))]
pub async fn enqueue_dummy(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
) -> Result<EnqueueOutcome, QueueError> {
    insert_and_observe(pool, tenant_id, queue_code, tenant_id, mint_suffix(), false).await
}

async fn insert_and_observe(
    pool: &PgPool,
    tenant_id: TenantId,
    queue_code: Code,
    uid: TenantId,
    keycode_suffix: String,
    enforce_single_live_row: bool,
) -> Result<EnqueueOutcome, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    let mut tx = pool.begin().await?;

    let summary: Option<(String, String, bool)> = sqlx::query_as(&format!(
        "SELECT name, caption, maintenance FROM summary_{suffix}
          WHERE queue_code = $1 AND delete_flag = FALSE"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .fetch_optional(&mut *tx)
    .await?;

    let (vendor_name, vendor_caption, maintenance) =
        summary.ok_or(QueueError::QueueCodeNotfound)?;
    if maintenance {
        return Err(QueueError::QueueMaintenance);
    }

    if enforce_single_live_row {
        let already_live: Option<i64> = sqlx::query_scalar(&format!(
            "SELECT id FROM queue_{suffix}
              WHERE queue_code = $1 AND uid = $2 AND status = 1 AND delete_flag = FALSE
              LIMIT 1"
        ))
        .bind(queue_code.as_bytes().as_slice())
        .bind(uid.as_u64() as i64)
        .fetch_optional(&mut *tx)
        .await?;

        if already_live.is_some() {
            return Err(QueueError::AlreadyEnqueued);
        }
    }

    let keycode_prefix: i64 = sqlx::query_scalar(&format!("SELECT nextseq_{suffix}($1)"))
        .bind("NUM")
        .fetch_one(&mut *tx)
        .await?;

    let row_id: i64 = sqlx::query_scalar(&format!(
        "INSERT INTO queue_{suffix}
            (queue_code, uid, keycode_prefix, keycode_suffix, status)
         VALUES ($1, $2, $3, $4, 1)
         RETURNING id"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(uid.as_u64() as i64)
    .bind(keycode_prefix)
    .bind(&keycode_suffix)
    .fetch_one(&mut *tx)
    .await?;

    let persons_waiting_before: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND status = 1 AND delete_flag = FALSE AND id < $2"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .bind(row_id)
    .fetch_one(&mut *tx)
    .await?;

    let total_waiting: i64 = sqlx::query_scalar(&format!(
        "SELECT count(*) FROM queue_{suffix}
          WHERE queue_code = $1 AND status = 1 AND delete_flag = FALSE"
    ))
    .bind(queue_code.as_bytes().as_slice())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(EnqueueOutcome {
        vendor_name,
        vendor_caption,
        keycode_prefix,
        keycode_suffix,
        persons_waiting_before,
        total_waiting,
    })
}
