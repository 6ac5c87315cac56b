//! `Detail` (`spec.md` §4.8): the singleton summary's display fields.

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::TenantError;
use crate::model::DetailOutcome;

#[instrument(skip(shard_pool), fields(tenant_id = %tenant_id))]
pub async fn detail(shard_pool: &PgPool, tenant_id: TenantId) -> Result<DetailOutcome, TenantError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(TenantError::Queue(vql_queue::QueueError::InvalidSuffix));
    }

    let (name, caption): (String, String) = sqlx::query_as(&format!(
        "SELECT name, caption FROM summary_{suffix} WHERE id = 1"
    ))
    .fetch_one(shard_pool)
    .await?;

    Ok(DetailOutcome { name, caption })
}
