//! `/on/vendor/*` (`spec.md` §4.7, §4.8, §6). Every route here is
//! authenticated and acts on the caller's own tenant id — a vendor only
//! ever touches its own shard row, never another tenant's.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use chrono::Utc;
use serde::Deserialize;
use vql_codec::{from_url_safe, Code};
use vql_queue::QueueStatus;
use vql_respcode::ResponseCode;
use vql_shard::CredentialSet;

use crate::context::authenticate;
use crate::dto::{
    DummyRequest, EmptyBody, EnqueueResponseBody, ManageEntryBody, ManageResponseBody,
    UpdateVendorRequest, UpdateVendorResponseBody, UpdatedResponseBody, UpgradeRequest,
    UpgradeResponseBody, VendorDequeueRequest,
};
use crate::errors::{squash_and_log, ToResponseCode};
use crate::state::AppState;
use crate::wire::{decode_request, respond};

pub async fn upgrade(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<UpgradeRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let master_pool = state.router.master(CredentialSet::Normal);
    let shard_pool = state.router.shard(CredentialSet::Normal, uid);

    let outcome = vql_tenant::upgrade(
        master_pool,
        shard_pool,
        uid,
        now,
        &req.name,
        &req.caption,
        req.require_admit,
    )
    .await;

    match outcome {
        Ok(o) => respond(
            ResponseCode::ResponseOk,
            ticks,
            UpgradeResponseBody {
                vendor_code: o.vendor_code.to_base64(),
                queue_code: o.queue_code.to_base64(),
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}

pub async fn update(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<UpdateVendorRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let shard_pool = state.router.shard(CredentialSet::Normal, uid);
    let outcome = vql_tenant::update(shard_pool, uid, &req.name, &req.caption, req.require_init_queue).await;

    match outcome {
        Ok(o) => respond(
            ResponseCode::ResponseOk,
            ticks,
            UpdateVendorResponseBody {
                queue_code: o.queue_code.map(|c| c.to_base64()),
                reset_count: o.reset_count,
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}

pub async fn dummy(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<DummyRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let queue_code = match Code::from_base64(&req.queue_code) {
        Ok(c) => c,
        Err(_) => return respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}),
    };

    let shard_pool = state.router.shard(CredentialSet::Normal, uid);
    let outcome = vql_queue::enqueue_dummy(shard_pool, uid, queue_code).await;

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
pub struct PagedQuery {
    #[serde(default)]
    pub ticks: i64,
}

fn status_label(status: QueueStatus) -> String {
    match status {
        QueueStatus::Enqueued => "Enqueued".to_string(),
        QueueStatus::Dequeued => "Dequeued".to_string(),
        QueueStatus::Cancelled => "Cancelled".to_string(),
    }
}

async fn manage_page(
    state: &AppState,
    headers: &HeaderMap,
    queue_code_raw: &str,
    page_raw: &str,
    ticks: i64,
) -> Result<(vql_queue::ManagePage, i64), String> {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = authenticate(state, headers, now)
        .await
        .map_err(|code| respond(squash_and_log(code, squash), ticks, EmptyBody {}))?;

    if queue_code_raw.is_empty() {
        return Err(respond(
            squash_and_log(ResponseCode::ResponseOkVendorRequireInitialize, squash),
            ticks,
            ManageResponseBody::default(),
        ));
    }

    let queue_code_b64 = from_url_safe(queue_code_raw);
    let queue_code = Code::from_base64(&queue_code_b64)
        .map_err(|_| respond(squash_and_log(ResponseCode::QueueCodeNotfound, squash), ticks, EmptyBody {}))?;

    let page: i64 = page_raw
        .parse()
        .map_err(|_| respond(squash_and_log(ResponseCode::QueryExecuteFailed, squash), ticks, EmptyBody {}))?;

    let shard_pool = state.router.shard(CredentialSet::Normal, uid);
    let page_result = vql_queue::manage(shard_pool, uid, queue_code, page)
        .await
        .map_err(|e| respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}))?;

    Ok((page_result, ticks))
}

pub async fn manage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((queue_code_raw, page_raw)): Path<(String, String)>,
    Query(query): Query<PagedQuery>,
) -> String {
    let (page, ticks) = match manage_page(&state, &headers, &queue_code_raw, &page_raw, query.ticks).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    respond(
        ResponseCode::ResponseOk,
        ticks,
        ManageResponseBody {
            entries: page
                .entries
                .iter()
                .map(|e| ManageEntryBody {
                    key_code_prefix: e.keycode_prefix.to_string(),
                    key_code_suffix: e.keycode_suffix.clone(),
                    status: status_label(e.status),
                })
                .collect(),
            total: page.total,
            queuing_total: page.queuing_total,
        },
    )
}

/// The waiting-list view (`GET /on/vendor/queue/:queueCode/:page`): the same
/// page as [`manage`] restricted to still-`Enqueued` entries, since a vendor
/// watching the live line has no use for already-settled rows.
pub async fn waiting_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((queue_code_raw, page_raw)): Path<(String, String)>,
    Query(query): Query<PagedQuery>,
) -> String {
    let (page, ticks) = match manage_page(&state, &headers, &queue_code_raw, &page_raw, query.ticks).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    respond(
        ResponseCode::ResponseOk,
        ticks,
        ManageResponseBody {
            entries: page
                .entries
                .iter()
                .filter(|e| matches!(e.status, QueueStatus::Enqueued))
                .map(|e| ManageEntryBody {
                    key_code_prefix: e.keycode_prefix.to_string(),
                    key_code_suffix: e.keycode_suffix.clone(),
                    status: status_label(e.status),
                })
                .collect(),
            total: page.total,
            queuing_total: page.queuing_total,
        },
    )
}

pub async fn dequeue(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let uid = match authenticate(&state, &headers, now).await {
        Ok(id) => id,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<VendorDequeueRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let keycode_prefix: i64 = match req.key_code_prefix.parse() {
        Ok(v) => v,
        Err(_) => return respond(squash_and_log(ResponseCode::VendorDequeueFailed, squash), ticks, EmptyBody {}),
    };

    let shard_pool = state.router.shard(CredentialSet::Normal, uid);
    let outcome = vql_queue::dequeue(shard_pool, uid, req.force, keycode_prefix, req.key_code_suffix.as_deref()).await;

    match outcome {
        Ok(o) => respond(ResponseCode::ResponseOk, ticks, UpdatedResponseBody { updated: o.updated }),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}
