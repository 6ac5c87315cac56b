//! Header parsing and the auth-gate call site (`spec.md` §4.6, §6).
//!
//! Not a `tower` middleware: each authenticated handler needs the resolved
//! `TenantId` in hand before it can pick a shard pool, so the gate is called
//! directly at the top of the handler rather than injected via an
//! extension. This keeps the "only place identity is established" property
//! of `spec.md` §4.6 in one function ([`authenticate`]) without hiding the
//! shard-selection dependency behind a layer.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use vql_codec::Code;
use vql_core::TenantId;
use vql_respcode::ResponseCode;

use crate::errors::ToResponseCode;
use crate::state::AppState;

pub struct BootstrapHeaders {
    pub nonce: String,
    pub platform: String,
}

pub struct AuthHeaders {
    pub nonce: String,
    pub session: Code,
    pub hash: Vec<u8>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

/// Parse `IV`/`Nonce`/`Platform` for an unauthenticated bootstrap request
/// (`/new`, `/logon`). `IV` must parse as an integer anchor but is
/// otherwise unused downstream; `Nonce` must also parse as an integer
/// anchor even though it is carried onward as text into the HMAC input
/// (`spec.md` §4.1).
pub fn parse_bootstrap_headers(headers: &HeaderMap) -> Result<BootstrapHeaders, ResponseCode> {
    header_str(headers, "IV")
        .ok_or(ResponseCode::TicksInvalid)?
        .parse::<i64>()
        .map_err(|_| ResponseCode::TicksInvalid)?;

    let nonce = header_str(headers, "Nonce").ok_or(ResponseCode::NonceInvalid)?;
    nonce.parse::<i64>().map_err(|_| ResponseCode::NonceInvalid)?;

    let platform = header_str(headers, "Platform").unwrap_or_default().to_string();

    Ok(BootstrapHeaders {
        nonce: nonce.to_string(),
        platform,
    })
}

/// Parse `Nonce`/`Session`/`Hash` for an authenticated request.
pub fn parse_auth_headers(headers: &HeaderMap) -> Result<AuthHeaders, ResponseCode> {
    let nonce = header_str(headers, "Nonce").ok_or(ResponseCode::NonceInvalid)?;
    nonce.parse::<i64>().map_err(|_| ResponseCode::NonceInvalid)?;

    let session = header_str(headers, "Session").ok_or(ResponseCode::UserAuthNotFound)?;
    let session = Code::from_base64(session).map_err(|_| ResponseCode::UserAuthNotFound)?;

    let hash = header_str(headers, "Hash").ok_or(ResponseCode::UserAuthFailed)?;
    let hash = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, hash)
        .map_err(|_| ResponseCode::UserAuthFailed)?;

    Ok(AuthHeaders {
        nonce: nonce.to_string(),
        session,
        hash,
    })
}

/// Run the auth gate (`spec.md` §4.6) and return the resolved tenant id.
/// Every failure mode is already mapped to its true [`ResponseCode`]; the
/// caller is responsible for squashing before it reaches the wire.
pub async fn authenticate(state: &AppState, headers: &HeaderMap, now: DateTime<Utc>) -> Result<TenantId, ResponseCode> {
    let parsed = parse_auth_headers(headers)?;
    vql_auth::authenticate(
        state.router.master(vql_shard::CredentialSet::Normal),
        &state.config.auth,
        now,
        parsed.session,
        &parsed.nonce,
        &parsed.hash,
    )
    .await
    .map_err(|e| e.to_response_code())
}
