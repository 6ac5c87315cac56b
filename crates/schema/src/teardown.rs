//! Operator-only shard-object teardown (`spec.md` §4.5 `Drop`, §9 Open
//! Questions: `DropVendor` is routed through the operator gate).

use sqlx::PgPool;
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::ProvisionError;

/// Drop every object `provision` created for `tenant_id`. Best-effort: each
/// statement is `IF EXISTS`, so a partially-provisioned tenant (crashed
/// mid-`Upgrade`) tears down cleanly too.
#[instrument(skip(pool), fields(tenant_id = %tenant_id))]
pub async fn drop_tenant_schema(pool: &PgPool, tenant_id: TenantId) -> Result<(), ProvisionError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(ProvisionError::InvalidSuffix);
    }

    for statement in [
        format!("DROP FUNCTION IF EXISTS currseq_{suffix}(TEXT)"),
        format!("DROP FUNCTION IF EXISTS nextseq_{suffix}(TEXT)"),
        format!("DROP FUNCTION IF EXISTS setseq_{suffix}(TEXT, BIGINT)"),
        format!("DROP TABLE IF EXISTS queue_backup_{suffix}"),
        format!("DROP TABLE IF EXISTS queue_{suffix}"),
        format!("DROP TABLE IF EXISTS keycode_{suffix}"),
        format!("DROP TABLE IF EXISTS auth_{suffix}"),
        format!("DROP TABLE IF EXISTS sequence_{suffix}"),
        format!("DROP TABLE IF EXISTS summary_{suffix}"),
    ] {
        sqlx::query(&statement).execute(pool).await?;
    }

    tracing::debug!(suffix = %suffix, "tenant schema dropped");
    Ok(())
}
