//! `POST /on/queue`, `GET /on/queue/:vendorCode/:queueCode`, `POST /on/dequeue`
//! (`spec.md` §4.7, §6).

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use chrono::Utc;
use serde::Deserialize;
use vql_codec::{from_url_safe, Code};
use vql_respcode::ResponseCode;

use crate::context::authenticate;
use crate::dto::{CancelRequest, EmptyBody, EnqueueRequest, EnqueueResponseBody, ShowQueueResponseBody, UpdatedResponseBody};
use crate::errors::{squash_and_log, ToResponseCode};
use crate::state::AppState;
use crate::wire::{decode_request, respond};

async fn resolve_vendor_or_respond(
    state: &AppState,
    vendor_code_b64: &str,
    squash: bool,
    ticks: i64,
) -> Result<(vql_core::TenantId, Code), String> {
    let vendor_code = Code::from_base64(vendor_code_b64)
        .map_err(|_| respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}))?;

    let vendor_id = vql_auth::resolve_vendor(state.router.master(vql_shard::CredentialSet::Normal), vendor_code)
        .await
        .map_err(|e| respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}))?
        .ok_or_else(|| respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}))?;

    Ok((vendor_id, vendor_code))
}

pub async fn enqueue(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<EnqueueRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let (vendor_id, _) = match resolve_vendor_or_respond(&state, &req.vendor_code, squash, ticks).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let queue_code = match Code::from_base64(&req.queue_code) {
        Ok(c) => c,
        Err(_) => return respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}),
    };

    let shard_pool = state.router.shard(vql_shard::CredentialSet::Normal, vendor_id);
    let outcome = vql_queue::enqueue(shard_pool, vendor_id, queue_code, uid).await;

    match outcome {
        Ok(o) => respond(
            ResponseCode::ResponseOk,
            ticks,
            EnqueueResponseBody {
                vendor_name: o.vendor_name,
                vendor_caption: o.vendor_caption,
                key_code_prefix: o.keycode_prefix.to_string(),
                key_code_suffix: o.keycode_suffix,
                persons_waiting_before: o.persons_waiting_before,
                total_waiting: o.total_waiting,
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}

#[derive(Deserialize)]
pub struct ShowQueueQuery {
    #[serde(default)]
    pub ticks: i64,
}

pub async fn show_queue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((vendor_code_raw, queue_code_raw)): Path<(String, String)>,
    Query(query): Query<ShowQueueQuery>,
) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();
    let ticks = query.ticks;

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), ticks, EmptyBody {}),
    };

    let vendor_code_b64 = from_url_safe(&vendor_code_raw);
    let queue_code_b64 = from_url_safe(&queue_code_raw);

    let (vendor_id, _) = match resolve_vendor_or_respond(&state, &vendor_code_b64, squash, ticks).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let queue_code = match Code::from_base64(&queue_code_b64) {
        Ok(c) => c,
        Err(_) => return respond(squash_and_log(ResponseCode::KeyCodeCodeNotfound, squash), ticks, EmptyBody {}),
    };

    let shard_pool = state.router.shard(vql_shard::CredentialSet::Normal, vendor_id);
    let outcome = vql_queue::show_queue(shard_pool, vendor_id, queue_code, uid).await;

    match outcome {
        Ok(o) => respond(
            ResponseCode::ResponseOk,
            ticks,
            ShowQueueResponseBody {
                status: format!("{:?}", o.status),
                persons_waiting_before: o.persons_waiting_before,
                total_waiting: o.total_waiting,
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}

pub async fn cancel(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<CancelRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let (vendor_id, _) = match resolve_vendor_or_respond(&state, &req.vendor_code, squash, ticks).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let queue_code = match Code::from_base64(&req.queue_code) {
        Ok(c) => c,
        Err(_) => return respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}),
    };

    let keycode_prefix: i64 = match req.key_code_prefix.parse() {
        Ok(v) => v,
        Err(_) => return respond(squash_and_log(ResponseCode::UserDequeueFailed, squash), ticks, EmptyBody {}),
    };

    let shard_pool = state.router.shard(vql_shard::CredentialSet::Normal, vendor_id);
    let outcome = vql_queue::cancel(shard_pool, vendor_id, queue_code, uid, keycode_prefix).await;

    match outcome {
        Ok(o) => respond(ResponseCode::ResponseOk, ticks, UpdatedResponseBody { updated: o.updated }),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}
