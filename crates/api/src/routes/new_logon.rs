//! `POST /new`, `POST /logon` (`spec.md` §6, §4.5).

use axum::extract::State;
use axum::http::HeaderMap;
use base64::Engine;
use chrono::Utc;
use vql_respcode::ResponseCode;

use crate::context::parse_bootstrap_headers;
use crate::dto::{CreateRequest, CreateResponseBody, EmptyBody, LogonRequest, LogonResponseBody};
use crate::errors::{squash_and_log, ToResponseCode};
use crate::state::AppState;
use crate::wire::{decode_request, respond};

pub async fn create(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    let bootstrap = match parse_bootstrap_headers(&headers) {
        Ok(h) => h,
        Err(code) => return respond(squash_and_log(code, squash), 0, EmptyBody {}),
    };

    let (req, ticks) = match decode_request::<CreateRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let seed_bytes = match base64::engine::general_purpose::STANDARD.decode(&req.seed) {
        Ok(b) => b,
        Err(_) => {
            return respond(
                squash_and_log(ResponseCode::SeedInvalid, squash),
                ticks,
                EmptyBody {},
            )
        }
    };

    let outcome = vql_auth::create(
        state.router.master(vql_shard::CredentialSet::Normal),
        &state.config.auth,
        now,
        vql_auth::CreateAccountInput {
            identifier_type: &req.identifier_type,
            platform_type: &bootstrap.platform,
            identifier: &req.identifier,
            ticks: req.ticks,
            nonce: &bootstrap.nonce,
            seed: &seed_bytes,
        },
    )
    .await;

    match outcome {
        Ok(issued) => respond(
            ResponseCode::ResponseOk,
            ticks,
            CreateResponseBody {
                private_code: issued.private_code.to_base64(),
                session_id: issued.session_id.to_base64(),
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}

pub async fn logon(State(state): State<AppState>, headers: HeaderMap, body: String) -> String {
    let squash = state.config.security_squash;
    let now = Utc::now();

    if let Err(code) = parse_bootstrap_headers(&headers) {
        return respond(squash_and_log(code, squash), 0, EmptyBody {});
    }

    let (req, ticks) = match decode_request::<LogonRequest>(&body) {
        Ok(v) => v,
        Err((code, t)) => return respond(squash_and_log(code, squash), t, EmptyBody {}),
    };

    let private_code = match vql_codec::Code::from_base64(&req.private_code) {
        Ok(c) => c,
        Err(_) => {
            return respond(
                squash_and_log(ResponseCode::UserAuthNotFound, squash),
                ticks,
                EmptyBody {},
            )
        }
    };

    let outcome = vql_auth::logon(
        state.router.master(vql_shard::CredentialSet::Normal),
        &state.config.auth,
        now,
        private_code,
    )
    .await;

    match outcome {
        Ok(issued) => respond(
            ResponseCode::ResponseOk,
            ticks,
            LogonResponseBody {
                session_id: issued.session_id.to_base64(),
            },
        ),
        Err(e) => respond(squash_and_log(e.to_response_code(), squash), ticks, EmptyBody {}),
    }
}
