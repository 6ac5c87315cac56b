//! `Update` — rename and optional queue reset (`spec.md` §4.8).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::TenantError;
use crate::model::UpdateOutcome;

#[instrument(skip(shard_pool), fields(tenant_id = %tenant_id))]
pub async fn update(
    shard_pool: &PgPool,
    tenant_id: TenantId,
    name: &str,
    caption: &str,
    require_init_queue: bool,
) -> Result<UpdateOutcome, TenantError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(TenantError::Queue(vql_queue::QueueError::InvalidSuffix));
    }

    let mut tx = shard_pool.begin().await?;

    sqlx::query(&format!(
        "UPDATE summary_{suffix} SET name = $1, caption = $2, updated_at = now() WHERE id = 1"
    ))
    .bind(name)
    .bind(caption)
    .execute(&mut *tx)
    .await?;

    let outcome = if require_init_queue {
        let init = vql_queue::init_queue(&mut tx, tenant_id, false).await?;
        UpdateOutcome {
            queue_code: Some(init.queue_code),
            reset_count: Some(init.reset_count),
        }
    } else {
        UpdateOutcome {
            queue_code: None,
            reset_count: None,
        }
    };

    tx.commit().await?;
    Ok(outcome)
}
