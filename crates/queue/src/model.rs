//! Queue-row and result types (`spec.md` §3, §4.7).

use serde::{Deserialize, Serialize};

pub use vql_codec::Code;
pub use vql_core::TenantId;

/// `Queue.status` (`spec.md` §3, §9 Redesign Flags).
///
/// The source collapses `Dequeued`/`Cancelled` onto the same integer `2`;
/// this is the spec's mandated split so `Manage`/`ShowQueue` can tell a
/// vendor-side completion from a consumer-side abandonment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum QueueStatus {
    Enqueued = 1,
    Dequeued = 2,
    Cancelled = 3,
}

impl QueueStatus {
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Enqueued),
            2 => Some(Self::Dequeued),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Outcome of `Enqueue` (`spec.md` §4.7).
#[derive(Debug, Clone)]
pub struct EnqueueOutcome {
    pub vendor_name: String,
    pub vendor_caption: String,
    pub keycode_prefix: i64,
    pub keycode_suffix: String,
    pub persons_waiting_before: i64,
    pub total_waiting: i64,
}

/// Outcome of `ShowQueue` (`spec.md` §4.7).
#[derive(Debug, Clone)]
pub struct ShowQueueOutcome {
    pub status: QueueStatus,
    pub persons_waiting_before: Option<i64>,
    pub total_waiting: Option<i64>,
}

/// Outcome of `Cancel` / `Dequeue` — both are row-count-gated status flips.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOutcome {
    pub updated: bool,
}

/// One row in a `Manage` page (`spec.md` §4.7).
#[derive(Debug, Clone)]
pub struct ManageEntry {
    pub keycode_prefix: i64,
    pub keycode_suffix: String,
    pub status: QueueStatus,
}

/// A `Manage` page: entries plus the running totals (`spec.md` §4.7).
#[derive(Debug, Clone)]
pub struct ManagePage {
    pub entries: Vec<ManageEntry>,
    pub total: i64,
    pub queuing_total: i64,
}

/// Outcome of `InitQueue` (`spec.md` §4.4, §4.8): the freshly minted
/// `queueCode` for this incarnation.
#[derive(Debug, Clone, Copy)]
pub struct InitQueueOutcome {
    pub queue_code: Code,
    pub reset_count: i64,
}
