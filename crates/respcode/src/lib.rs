//! Closed response-code registry and the security-squash policy (component C2).
//!
//! Ranges mirror `spec.md` §4.2: transport/codec (10-19), storage (20-29),
//! vendor registration (100-), vendor view (200-), dequeue authority (300-),
//! notifications (400-, reserved/inactive), vendor auth (500-), consumer
//! enqueue (600-), consumer view (700-). Negative codes are "ok-with-advice":
//! the call succeeded but the caller should act on extra information.

use serde::{Deserialize, Serialize};

/// A single outcome code with a stable, human-readable meaning.
///
/// This is a closed enumeration: every wire-visible outcome has exactly one
/// variant here. Nothing outside this crate invents a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ResponseCode {
    /// The call succeeded with nothing further to report.
    ResponseOk = 0,

    // ---- advice (ok-with-advice, negative) -------------------------------
    /// More results are available; poll again.
    ResponseOkContinue = -1,
    /// The vendor authenticated but has not yet called `Upgrade` / `InitQueue`.
    ResponseOkVendorRequireInitialize = -200,
    /// A previously bootstrapped account was recovered via `privateCode`.
    ResponseOkAccountRecovered = -500,

    // ---- transport / codec (10-19) ---------------------------------------
    EncodeInvalid = 10,
    TicksInvalid = 11,
    NonceInvalid = 12,
    SeedInvalid = 13,
    HashGenerationFailed = 14,

    // ---- storage (20-29) ---------------------------------------------------
    ShardConnectFailed = 20,
    TransactionBeginFailed = 21,
    TransactionCommitFailed = 22,
    TransactionRollbackFailed = 23,
    PreparedStatementFailed = 24,
    QueryExecuteFailed = 25,

    // ---- vendor registration (100-) ---------------------------------------
    VendorAlreadyRegistered = 100,
    VendorUpgradeFailed = 101,
    VendorNotFound = 102,

    // ---- vendor view (200-) -------------------------------------------------
    VendorManageFailed = 200,
    VendorDetailFailed = 201,

    // ---- dequeue authority (300-) -------------------------------------------
    VendorDequeueFailed = 300,
    QueryConsistencyViolation = 301,

    // ---- notifications (400-, modeled but inactive) -------------------------
    NotificationDisabled = 400,

    // ---- vendor auth / session (500-) ---------------------------------------
    UserAuthNotFound = 500,
    UserAuthFailed = 501,
    AccountInvalid = 502,
    SessionExpired = 503,

    // ---- consumer enqueue (600-) ---------------------------------------------
    QueueCodeNotfound = 600,
    QueueMaintenance = 601,
    AlreadyEnqueued = 602,

    // ---- consumer view (700-) -------------------------------------------------
    KeyCodeCodeNotfound = 700,
    UserDequeueFailed = 701,
    AlreadyCancelled = 702,
    AlreadyDequeued = 703,
    OutOfTime = 704,

    /// The single opaque code any squashed failure collapses to.
    SecSquashed = 999,
}

impl ResponseCode {
    /// Stable, one-line, non-sensitive meaning. Safe to log or (for advice
    /// codes) put on the wire; never put a non-advice message on the wire
    /// when security-squash is active.
    pub fn message(&self) -> &'static str {
        match self {
            ResponseCode::ResponseOk => "ok",
            ResponseCode::ResponseOkContinue => "ok: more results available",
            ResponseCode::ResponseOkVendorRequireInitialize => "ok: vendor has no queue yet",
            ResponseCode::ResponseOkAccountRecovered => "ok: account recovered",
            ResponseCode::EncodeInvalid => "envelope encoding invalid",
            ResponseCode::TicksInvalid => "ticks invalid",
            ResponseCode::NonceInvalid => "nonce invalid",
            ResponseCode::SeedInvalid => "seed invalid",
            ResponseCode::HashGenerationFailed => "hash generation failed",
            ResponseCode::ShardConnectFailed => "shard connect failed",
            ResponseCode::TransactionBeginFailed => "transaction begin failed",
            ResponseCode::TransactionCommitFailed => "transaction commit failed",
            ResponseCode::TransactionRollbackFailed => "transaction rollback failed",
            ResponseCode::PreparedStatementFailed => "prepared statement failed",
            ResponseCode::QueryExecuteFailed => "query execute failed",
            ResponseCode::VendorAlreadyRegistered => "vendor already registered",
            ResponseCode::VendorUpgradeFailed => "vendor upgrade failed",
            ResponseCode::VendorNotFound => "vendor not found",
            ResponseCode::VendorManageFailed => "vendor manage failed",
            ResponseCode::VendorDetailFailed => "vendor detail failed",
            ResponseCode::VendorDequeueFailed => "vendor dequeue failed",
            ResponseCode::QueryConsistencyViolation => "query consistency violation",
            ResponseCode::NotificationDisabled => "notifications are not active",
            ResponseCode::UserAuthNotFound => "user auth not found",
            ResponseCode::UserAuthFailed => "user auth failed",
            ResponseCode::AccountInvalid => "account invalid",
            ResponseCode::SessionExpired => "session expired",
            ResponseCode::QueueCodeNotfound => "queue code not found",
            ResponseCode::QueueMaintenance => "queue is in maintenance",
            ResponseCode::AlreadyEnqueued => "already enqueued",
            ResponseCode::KeyCodeCodeNotfound => "key code not found",
            ResponseCode::UserDequeueFailed => "user dequeue failed",
            ResponseCode::AlreadyCancelled => "already cancelled",
            ResponseCode::AlreadyDequeued => "already dequeued",
            ResponseCode::OutOfTime => "out of time",
            ResponseCode::SecSquashed => "request could not be completed",
        }
    }

    /// "ok-with-advice" codes are negative and safe to surface verbatim even
    /// under security-squash: they carry no information an attacker can use
    /// to distinguish failure causes, only operational guidance.
    pub fn is_advice(&self) -> bool {
        (*self as i32) < 0
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

/// Apply the security-squash policy: advice codes and `ResponseOk` pass
/// through unchanged; every other code collapses to [`ResponseCode::SecSquashed`].
///
/// The caller is expected to have already logged `code` at its true value
/// before calling this — squashing is a wire-boundary concern, not a
/// logging concern (`spec.md` §4.2, §7).
pub fn squash(code: ResponseCode, enabled: bool) -> ResponseCode {
    if !enabled || code.is_advice() || matches!(code, ResponseCode::ResponseOk) {
        code
    } else {
        ResponseCode::SecSquashed
    }
}
