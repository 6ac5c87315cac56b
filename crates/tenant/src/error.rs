use thiserror::Error;
use vql_auth::AuthError;
use vql_queue::QueueError;
use vql_schema::ProvisionError;

/// Tenant-lifecycle failure kinds (`spec.md` §4.8, §7), composed from the
/// three collaborators an upgrade/update/drop touches.
#[derive(Debug, Error)]
pub enum TenantError {
    #[error("vendor upgrade failed: {0}")]
    Auth(#[from] AuthError),

    #[error("vendor upgrade failed: {0}")]
    Provision(#[from] ProvisionError),

    #[error("vendor upgrade failed: {0}")]
    Queue(#[from] QueueError),

    #[error("query execute failed: {0}")]
    QueryExecuteFailed(#[from] sqlx::Error),

    /// `Purge` is a documented placeholder (`spec.md` §4.8) — it exists as
    /// an operation name with no implemented effect, not a bug.
    #[error("purge is not implemented")]
    NotImplemented,
}
