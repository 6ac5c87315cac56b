//! Maps every library error onto the closed [`ResponseCode`] registry and
//! applies the security-squash policy before anything reaches the wire
//! (`spec.md` §4.2, §7).

use vql_auth::AuthError;
use vql_codec::CodecError;
use vql_queue::QueueError;
use vql_respcode::{squash, ResponseCode};
use vql_tenant::TenantError;

pub trait ToResponseCode {
    fn to_response_code(&self) -> ResponseCode;
}

impl ToResponseCode for CodecError {
    fn to_response_code(&self) -> ResponseCode {
        match self {
            CodecError::EncodeInvalid => ResponseCode::EncodeInvalid,
            CodecError::TicksInvalid => ResponseCode::TicksInvalid,
            CodecError::NonceInvalid => ResponseCode::NonceInvalid,
            CodecError::SeedInvalid => ResponseCode::SeedInvalid,
            CodecError::HashGenerationFailed => ResponseCode::HashGenerationFailed,
        }
    }
}

impl ToResponseCode for AuthError {
    fn to_response_code(&self) -> ResponseCode {
        match self {
            AuthError::SeedInvalid => ResponseCode::SeedInvalid,
            AuthError::NonceInvalid => ResponseCode::NonceInvalid,
            AuthError::UserAuthNotFound => ResponseCode::UserAuthNotFound,
            AuthError::UserAuthFailed => ResponseCode::UserAuthFailed,
            AuthError::AccountInvalid => ResponseCode::AccountInvalid,
            AuthError::SessionExpired => ResponseCode::SessionExpired,
            AuthError::QueryExecuteFailed(_) => ResponseCode::QueryExecuteFailed,
            AuthError::RollbackFailed { .. } => ResponseCode::QueryExecuteFailed,
        }
    }
}

impl ToResponseCode for QueueError {
    fn to_response_code(&self) -> ResponseCode {
        match self {
            QueueError::QueueCodeNotfound => ResponseCode::QueueCodeNotfound,
            QueueError::KeyCodeCodeNotfound => ResponseCode::KeyCodeCodeNotfound,
            QueueError::QueueMaintenance => ResponseCode::QueueMaintenance,
            QueueError::AlreadyEnqueued => ResponseCode::AlreadyEnqueued,
            QueueError::UserDequeueFailed => ResponseCode::UserDequeueFailed,
            QueueError::VendorDequeueFailed => ResponseCode::VendorDequeueFailed,
            QueueError::QueryConsistencyViolation(_) => ResponseCode::QueryConsistencyViolation,
            QueueError::InvalidSuffix => ResponseCode::QueryExecuteFailed,
            QueueError::QueryExecuteFailed(_) => ResponseCode::QueryExecuteFailed,
        }
    }
}

impl ToResponseCode for TenantError {
    fn to_response_code(&self) -> ResponseCode {
        match self {
            TenantError::Auth(e) => e.to_response_code(),
            TenantError::Provision(_) => ResponseCode::VendorUpgradeFailed,
            TenantError::Queue(e) => e.to_response_code(),
            TenantError::QueryExecuteFailed(_) => ResponseCode::QueryExecuteFailed,
            TenantError::NotImplemented => ResponseCode::VendorDetailFailed,
        }
    }
}

/// Apply `spec.md` §4.2's security-squash policy and log the true code
/// before it is discarded. Advice codes and `ResponseOk` pass through.
pub fn squash_and_log(code: ResponseCode, enabled: bool) -> ResponseCode {
    if !enabled || code.is_advice() || matches!(code, ResponseCode::ResponseOk) {
        return code;
    }
    tracing::warn!(code = code.as_i32(), message = code.message(), "squashing response code");
    squash(code, enabled)
}
