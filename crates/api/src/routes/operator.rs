//! `DELETE /on/priv/vendor` (`spec.md` §4.5, §4.8, §6).
//!
//! Authenticated through the normal session gate, same as every other
//! tenant-scoped route — there is no separate operator identity in
//! `spec.md` (§9 Open Questions notes this is undecided in the source).
//! What makes this "privileged" is the credential set the drop runs under
//! (`CredentialSet::Operator`, a DB user with DDL rights), matching
//! `original_source/internal/routes/priv/priv.go`, which uses `db.OpConns`
//! but resolves the target from `authCtx.Uid` — the caller's own tenant,
//! never a request-supplied id. A caller can only ever drop itself.

use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use vql_respcode::ResponseCode;
use vql_shard::CredentialSet;

use crate::context::authenticate;
use crate::dto::{DropVendorRequest, EmptyBody, UpdatedResponseBody};
use crate::errors::{squash_and_log, ToResponseCode};
use crate::state::AppState;
use crate::wire::{decode_request, respond};

pub async fn drop_vendor(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (_req, ticks) = match decode_request::<DropVendorRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let master_pool = state.router.master(CredentialSet::Operator);
    let shard_pool = state.router.shard(CredentialSet::Operator, uid);

    match vql_tenant::drop_vendor(master_pool, shard_pool, uid, now).await {
        Ok(()) => respond(ResponseCode::ResponseOk, ticks, UpdatedResponseBody { updated: true }),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}
