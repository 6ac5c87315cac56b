use thiserror::Error;

/// Queue-engine failure kinds (`spec.md` §4.7, §7).
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue code not found")]
    QueueCodeNotfound,

    #[error("key code not found")]
    KeyCodeCodeNotfound,

    #[error("queue is in maintenance")]
    QueueMaintenance,

    /// This consumer already holds a live (`Enqueued`) row for this queue
    /// incarnation (`spec.md` §8 property 3: at most one live row per
    /// `(tenant, queueCode, consumer)`). Only `Enqueue` checks this —
    /// `EnqueueDummy` intentionally stacks many rows under the vendor's own
    /// uid to synthesize ticket holders (`spec.md` §4.7).
    #[error("already enqueued")]
    AlreadyEnqueued,

    #[error("user dequeue failed")]
    UserDequeueFailed,

    #[error("vendor dequeue failed")]
    VendorDequeueFailed,

    /// More than one row matched an update that should affect at most one
    /// (`spec.md` §4.7: "a row count > 1 is a consistency violation").
    #[error("query consistency violation: {0} rows affected")]
    QueryConsistencyViolation(u64),

    #[error("refusing to operate with an invalid tenant suffix")]
    InvalidSuffix,

    #[error("query execute failed: {0}")]
    QueryExecuteFailed(#[from] sqlx::Error),
}
