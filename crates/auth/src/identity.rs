//! Identity & session store (component C5, `spec.md` §4.5).
//!
//! `Create` and `Logon` are the only entry points that mint a session;
//! everything else (the auth gate, upgrade) reads or refreshes one.
//! `Drop` is the operational, best-effort tenant teardown hook.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vql_codec::{mint_code, random_session_private, session_id_for, verify_seed, Code};
use vql_core::TenantId;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::model::AccountType;

/// Input to [`create`]; mirrors the bootstrap request body (`spec.md` §4.1, §4.5).
pub struct CreateAccountInput<'a> {
    pub identifier_type: &'a str,
    pub platform_type: &'a str,
    pub identifier: &'a str,
    pub ticks: i64,
    pub nonce: &'a str,
    pub seed: &'a [u8],
}

/// Result of a successful `Create` or `Logon`: the three secrets the caller
/// must hand back to the client (`spec.md` §4.5).
pub struct IssuedSession {
    pub tenant_id: TenantId,
    pub private_code: Code,
    pub session_id: Code,
    pub session_private: Code,
}

/// Create a consumer identity and its first session.
///
/// Inserts `Domain` (`vendorCode=""`, `shard=-1`) and `AuthAccount`
/// (`accountType=Consumer`) under one master transaction. The
/// `(identifier, seed)` uniqueness constraint on `auth_account` is what
/// stops the same identifier/seed pair from bootstrapping twice
/// (`spec.md` §4.5); a constraint violation surfaces as
/// [`AuthError::QueryExecuteFailed`].
#[instrument(skip(pool, cfg, input), fields(identifier = %input.identifier))]
pub async fn create(
    pool: &PgPool,
    cfg: &AuthConfig,
    now: DateTime<Utc>,
    input: CreateAccountInput<'_>,
) -> Result<IssuedSession, AuthError> {
    verify_seed(
        input.identifier,
        input.platform_type,
        input.ticks,
        input.nonce,
        &cfg.magic_key,
        input.seed,
    )
    .map_err(|_| AuthError::SeedInvalid)?;

    let private_code = mint_code();
    let session_id = session_id_for(&cfg.session_seed, private_code.as_bytes());
    let session_private = random_session_private();

    let mut tx = pool.begin().await?;

    let tenant_id: i64 = sqlx::query_scalar(
        "INSERT INTO domain (service_code, vendor_code, shard, delete_flag, created_at, updated_at)
         VALUES ('', ''::bytea, -1, FALSE, $1, $1)
         RETURNING id",
    )
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(AuthError::from)?;

    sqlx::query(
        "INSERT INTO auth_account
            (id, identifier_type, platform_type, identifier, seed, ticks, private_code,
             account_type, session_id, session_private, session_footprint, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11, $11)",
    )
    .bind(tenant_id)
    .bind(input.identifier_type)
    .bind(input.platform_type)
    .bind(input.identifier)
    .bind(input.seed)
    .bind(input.ticks)
    .bind(private_code.as_bytes().as_slice())
    .bind(AccountType::Consumer as i16)
    .bind(session_id.as_bytes().as_slice())
    .bind(session_private.as_bytes().as_slice())
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(AuthError::from)?;

    tx.commit().await?;

    Ok(IssuedSession {
        tenant_id: TenantId::new(tenant_id as u64),
        private_code,
        session_id,
        session_private,
    })
}

/// Rebind a session by `privateCode` (`spec.md` §4.5).
///
/// Issues a fresh `sessionId`/`sessionPrivate` pair and refreshes
/// `sessionFootprint`. Zero matches is `UserAuthNotFound`; more than one is
/// `UserAuthFailed` — a consistency violation, since `privateCode` is
/// globally unique by construction.
#[instrument(skip(pool, cfg, private_code))]
pub async fn logon(
    pool: &PgPool,
    cfg: &AuthConfig,
    now: DateTime<Utc>,
    private_code: Code,
) -> Result<IssuedSession, AuthError> {
    let mut tx = pool.begin().await?;

    let rows: Vec<(i64, i16)> = sqlx::query_as(
        "SELECT id, account_type FROM auth_account WHERE private_code = $1 FOR UPDATE",
    )
    .bind(private_code.as_bytes().as_slice())
    .fetch_all(&mut *tx)
    .await?;

    let (tenant_id, account_type_raw) = match rows.as_slice() {
        [] => return Err(AuthError::UserAuthNotFound),
        [single] => *single,
        _ => return Err(AuthError::UserAuthFailed),
    };
    let account_type = AccountType::from(account_type_raw);

    let session_id = session_id_for(cfg.session_seed_for(account_type), private_code.as_bytes());
    let session_private = random_session_private();

    sqlx::query(
        "UPDATE auth_account
            SET session_id = $1, session_private = $2, session_footprint = $3, updated_at = $3
          WHERE id = $4",
    )
    .bind(session_id.as_bytes().as_slice())
    .bind(session_private.as_bytes().as_slice())
    .bind(now)
    .bind(tenant_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(IssuedSession {
        tenant_id: TenantId::new(tenant_id as u64),
        private_code,
        session_id,
        session_private,
    })
}

/// Clear this tenant's domain row (operational, best-effort). Shard-object
/// teardown is `vql-schema`'s concern; `vql-tenant` orchestrates both under
/// the operator gate (`spec.md` §4.5, §9 Open Questions).
#[instrument(skip(pool))]
pub async fn drop_domain_row(pool: &PgPool, tenant_id: TenantId, now: DateTime<Utc>) -> Result<(), AuthError> {
    sqlx::query("UPDATE domain SET delete_flag = TRUE, updated_at = $2 WHERE id = $1")
        .bind(tenant_id.as_u64() as i64)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(())
}
