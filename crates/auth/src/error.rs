use thiserror::Error;
use vql_codec::CodecError;

/// Errors from identity bootstrap, session issuance, and the auth gate
/// (`spec.md` §4.5, §4.6, §7).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("seed invalid")]
    SeedInvalid,

    #[error("nonce invalid")]
    NonceInvalid,

    #[error("no account matched")]
    UserAuthNotFound,

    /// More than one row matched a lookup that should be unique
    /// (`privateCode`, `sessionId`) — a consistency violation, not a normal
    /// miss.
    #[error("more than one account matched")]
    UserAuthFailed,

    #[error("account is not a vendor")]
    AccountInvalid,

    #[error("session idle timeout exceeded")]
    SessionExpired,

    #[error("query execute failed: {0}")]
    QueryExecuteFailed(#[from] sqlx::Error),

    /// A rollback itself failed while unwinding from `during`. The original
    /// cause is kept, not discarded, even though only `SecSquashed` ever
    /// reaches the wire (`spec.md` §7).
    #[error("rollback failed ({source}) while handling: {during}")]
    RollbackFailed {
        source: sqlx::Error,
        during: Box<AuthError>,
    },
}

impl From<CodecError> for AuthError {
    fn from(value: CodecError) -> Self {
        match value {
            CodecError::SeedInvalid => AuthError::SeedInvalid,
            CodecError::NonceInvalid => AuthError::NonceInvalid,
            _ => AuthError::SeedInvalid,
        }
    }
}
