use sqlx::{Postgres, Transaction};
use tracing::instrument;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::ddl;
use crate::error::ProvisionError;

/// Provision the five per-tenant objects for `tenant_id` and seed the
/// singleton `Summary` row plus the `"NUM"` sequence, within `tx`.
///
/// Idempotent: every DDL statement is `IF NOT EXISTS` / `OR REPLACE`, and
/// both seed inserts are `ON CONFLICT DO NOTHING`, so replaying this call
/// against an already-provisioned shard (T2 re-run after a crash, per
/// `spec.md` §4.8) is a no-op rather than an error.
///
/// Stops short of creating the tenant's first queue: `vql-tenant` calls
/// `vql_queue::init_queue` in the same transaction immediately after this
/// returns, so that the summary row, the first queue, and the shard-index
/// bind all commit or roll back together.
#[instrument(skip(tx), fields(tenant_id = %tenant_id))]
pub async fn provision(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
    name: &str,
    caption: &str,
) -> Result<(), ProvisionError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(ProvisionError::InvalidSuffix);
    }

    for statement in [
        ddl::summary_table(&suffix),
        ddl::queue_table(&suffix),
        ddl::keycode_table(&suffix),
        ddl::auth_table(&suffix),
        ddl::sequence_table(&suffix),
    ] {
        sqlx::query(&statement).execute(&mut **tx).await?;
    }

    for statement in ddl::sequence_functions(&suffix) {
        sqlx::query(&statement).execute(&mut **tx).await?;
    }

    sqlx::query(&ddl::insert_summary_row(&suffix))
        .bind(name)
        .bind(caption)
        .execute(&mut **tx)
        .await?;

    sqlx::query(&ddl::seed_sequence_row(&suffix))
        .execute(&mut **tx)
        .await?;

    tracing::debug!(suffix = %suffix, "tenant schema provisioned");
    Ok(())
}
