//! `InitQueue` (`spec.md` §4.4, §4.8): mints a fresh `queueCode` incarnation,
//! archiving the previous one on reset.
//!
//! Runs inside the caller's transaction (T2 of the upgrade protocol, or the
//! queue-reset half of `Update`) so the summary mutation and, on reset, the
//! archive/truncate are atomic with whatever else that transaction does.

use sqlx::{Postgres, Transaction};
use tracing::instrument;
use vql_codec::mint_code;
use vql_core::TenantId;
use vql_shard::{to_suffix, validate_suffix};

use crate::error::QueueError;
use crate::model::InitQueueOutcome;

/// `atFirst = true`: the tenant's tables were just created empty by
/// `vql-schema`, so there is nothing to archive — mint the first
/// `queueCode` and set it on the singleton `Summary` row.
///
/// `atFirst = false`: a reset. Prior queue rows are copied into
/// `queue_backup_<h>` (dropped and recreated as a structural clone first,
/// per `spec.md` §4.8) before the live `queue_<h>` is truncated;
/// `resetCount` is bumped via `nextseq_<h>` the same way a ticket number is.
#[instrument(skip(tx), fields(tenant_id = %tenant_id))]
pub async fn init_queue(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
    at_first: bool,
) -> Result<InitQueueOutcome, QueueError> {
    let suffix = to_suffix(tenant_id);
    if !validate_suffix(&suffix) {
        return Err(QueueError::InvalidSuffix);
    }

    if !at_first {
        sqlx::query(&format!("DROP TABLE IF EXISTS queue_backup_{suffix}"))
            .execute(&mut **tx)
            .await?;
        sqlx::query(&format!(
            "CREATE TABLE queue_backup_{suffix} (LIKE queue_{suffix} INCLUDING ALL)"
        ))
        .execute(&mut **tx)
        .await?;
        sqlx::query(&format!(
            "INSERT INTO queue_backup_{suffix} SELECT * FROM queue_{suffix}"
        ))
        .execute(&mut **tx)
        .await?;
        sqlx::query(&format!("TRUNCATE TABLE queue_{suffix}"))
            .execute(&mut **tx)
            .await?;
    }

    let queue_code = mint_code();

    let reset_count: i64 = if at_first {
        sqlx::query(&format!(
            "UPDATE summary_{suffix} SET queue_code = $1, updated_at = now() WHERE id = 1"
        ))
        .bind(queue_code.as_bytes().as_slice())
        .execute(&mut **tx)
        .await?;
        0
    } else {
        // `resetCount` shares the tenant's single `"NUM"` sequence with
        // ticket numbers (`spec.md` §3: "every ticket and every queue-reset
        // generation consumes one next").
        let bumped: i64 = sqlx::query_scalar(&format!("SELECT nextseq_{suffix}($1)"))
            .bind("NUM")
            .fetch_one(&mut **tx)
            .await?;
        sqlx::query(&format!(
            "UPDATE summary_{suffix}
                SET queue_code = $1, reset_count = $2, updated_at = now()
              WHERE id = 1"
        ))
        .bind(queue_code.as_bytes().as_slice())
        .bind(bumped)
        .execute(&mut **tx)
        .await?;
        bumped
    };

    Ok(InitQueueOutcome {
        queue_code,
        reset_count,
    })
}
