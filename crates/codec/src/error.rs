use thiserror::Error;

/// Transport/codec failure kinds (`spec.md` §4.1, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Any malformed step of percent-decode / base64-decode / JSON-decode.
    #[error("envelope encoding invalid")]
    EncodeInvalid,

    /// The `Ticks` field (or `IV` header) failed to parse as an integer anchor.
    #[error("ticks invalid")]
    TicksInvalid,

    /// The `Nonce` header failed to parse as an integer anchor.
    #[error("nonce invalid")]
    NonceInvalid,

    /// The bootstrap seed did not verify against the derived HMAC witness.
    #[error("seed invalid")]
    SeedInvalid,

    /// The per-request HMAC proof failed to generate (should not happen in
    /// practice; reserved for fallible MAC construction, e.g. a bad key length).
    #[error("hash generation failed")]
    HashGenerationFailed,
}
