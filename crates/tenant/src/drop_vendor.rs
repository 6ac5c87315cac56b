//! `DropVendor` (`spec.md` §4.5, §9 Open Questions): drops the caller's own
//! tenant under the privileged `CredentialSet::Operator` DB pools. Caller
//! identity still comes from the normal session gate; this module never
//! sees or trusts a caller-supplied tenant id.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;

use crate::error::TenantError;

/// Drop this tenant's shard objects, then clear its master-side domain row.
/// Best-effort: logged, not retried (`spec.md` §4.5).
#[instrument(skip(master_pool, shard_pool), fields(tenant_id = %tenant_id))]
pub async fn drop_vendor(
    master_pool: &PgPool,
    shard_pool: &PgPool,
    tenant_id: TenantId,
    now: DateTime<Utc>,
) -> Result<(), TenantError> {
    if let Err(e) = vql_schema::drop_tenant_schema(shard_pool, tenant_id).await {
        tracing::warn!(error = %e, "drop_vendor: shard teardown failed, continuing best-effort");
    }
    vql_auth::drop_domain_row(master_pool, tenant_id, now).await?;
    Ok(())
}

/// `Purge` is a documented placeholder (`spec.md` §4.8): the operation
/// exists in the route table but has no implemented effect.
pub async fn purge(_tenant_id: TenantId) -> Result<(), TenantError> {
    Err(TenantError::NotImplemented)
}
