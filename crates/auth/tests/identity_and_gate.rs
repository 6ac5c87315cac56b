//! Identity bootstrap, logon, and the auth gate against a real Postgres
//! instance (`spec.md` §4.5, §4.6, §8 properties 5 and 8).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vql_auth::{create, logon, AuthConfig, CreateAccountInput};
use vql_codec::{derive_request_hash, derive_seed};

fn test_config() -> AuthConfig {
    AuthConfig {
        magic_key: b"test-magic-key".to_vec(),
        session_seed: b"test-session-seed".to_vec(),
        vendor_seed: b"test-vendor-seed".to_vec(),
        session_timeout: Duration::minutes(30),
    }
}

/// Seed scenario 1 from `spec.md` §8: a correctly-seeded `Create` succeeds
/// and returns a usable session.
#[sqlx::test(migrations = "../../migrations/master")]
async fn create_with_valid_seed_succeeds(pool: PgPool) {
    let cfg = test_config();
    let now = Utc::now();

    let identifier = "57ea5c1f17211a2c384a05030a88fcace73d9d92bd1c714da5c68ede09847304";
    let platform = "Windows";
    let ticks = 1592619000i64;
    let nonce = "637295289927929882";

    let seed = derive_seed(identifier, platform, ticks, nonce, &cfg.magic_key);

    let issued = create(
        &pool,
        &cfg,
        now,
        CreateAccountInput {
            identifier_type: "phone",
            platform_type: platform,
            identifier,
            ticks,
            nonce,
            seed: &seed,
        },
    )
    .await
    .expect("create should succeed with a correctly derived seed");

    assert_eq!(issued.private_code.to_base64().len(), 44);
    assert_eq!(issued.session_id.to_base64().len(), 44);
}

/// Seed scenario 2: a bad seed is rejected before any row is written.
#[sqlx::test(migrations = "../../migrations/master")]
async fn create_with_bad_seed_fails(pool: PgPool) {
    let cfg = test_config();
    let now = Utc::now();

    let result = create(
        &pool,
        &cfg,
        now,
        CreateAccountInput {
            identifier_type: "phone",
            platform_type: "Windows",
            identifier: "some-identifier",
            ticks: 1592619000,
            nonce: "637295289927929882",
            seed: b"not-a-real-seed-at-all-00000000",
        },
    )
    .await;

    assert!(matches!(result, Err(vql_auth::AuthError::SeedInvalid)));

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM domain")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "a rejected seed must not leave a partial domain row");
}

/// `Logon` rebinds the session and refreshes the footprint, and the new
/// session id differs from the one `Create` issued.
#[sqlx::test(migrations = "../../migrations/master")]
async fn logon_issues_a_fresh_session(pool: PgPool) {
    let cfg = test_config();
    let now = Utc::now();

    let identifier = "identifier-for-logon-test";
    let platform = "Windows";
    let ticks = 1592619000i64;
    let nonce = "1";
    let seed = derive_seed(identifier, platform, ticks, nonce, &cfg.magic_key);

    let created = create(
        &pool,
        &cfg,
        now,
        CreateAccountInput {
            identifier_type: "phone",
            platform_type: platform,
            identifier,
            ticks,
            nonce,
            seed: &seed,
        },
    )
    .await
    .unwrap();

    let relogged = logon(&pool, &cfg, now + Duration::seconds(5), created.private_code)
        .await
        .expect("logon with a valid private_code should succeed");

    assert_ne!(created.session_id, relogged.session_id);
}

/// `Logon` with an unrecognized `privateCode` is `UserAuthNotFound`.
#[sqlx::test(migrations = "../../migrations/master")]
async fn logon_with_unknown_private_code_fails(pool: PgPool) {
    let cfg = test_config();
    let bogus = vql_codec::mint_code();

    let result = logon(&pool, &cfg, Utc::now(), bogus).await;
    assert!(matches!(result, Err(vql_auth::AuthError::UserAuthNotFound)));
}

/// Property 8 (`spec.md` §8): no authenticated call succeeds once
/// `now() - sessionFootprint > SessionTimeout`.
#[sqlx::test(migrations = "../../migrations/master")]
async fn gate_rejects_an_idle_session_past_the_timeout(pool: PgPool) {
    let cfg = test_config();
    let now = Utc::now();

    let identifier = "identifier-for-timeout-test";
    let seed = derive_seed(identifier, "Windows", 1, "1", &cfg.magic_key);

    let issued = create(
        &pool,
        &cfg,
        now,
        CreateAccountInput {
            identifier_type: "phone",
            platform_type: "Windows",
            identifier,
            ticks: 1,
            nonce: "1",
            seed: &seed,
        },
    )
    .await
    .unwrap();

    let nonce = "42";
    let hash = derive_request_hash(issued.session_private.as_bytes(), nonce, &cfg.magic_key);

    // Still within the timeout window: the gate succeeds.
    let within_window = now + Duration::minutes(10);
    let resolved = vql_auth::authenticate(&pool, &cfg, within_window, issued.session_id, nonce, &hash)
        .await
        .expect("gate should accept a session within the idle-timeout window");
    assert_eq!(resolved, issued.tenant_id);

    // The footprint refreshed; well past the *original* create time but
    // still within `session_timeout` of the refreshed footprint, so the
    // gate still succeeds.
    let still_fresh = within_window + Duration::minutes(10);
    vql_auth::authenticate(&pool, &cfg, still_fresh, issued.session_id, nonce, &hash)
        .await
        .expect("a refreshed footprint resets the idle-timeout window");

    // Now push well past even the refreshed footprint.
    let expired = still_fresh + cfg.session_timeout + Duration::minutes(1);
    let result = vql_auth::authenticate(&pool, &cfg, expired, issued.session_id, nonce, &hash).await;
    assert!(matches!(result, Err(vql_auth::AuthError::UserAuthNotFound)));
}

/// The gate rejects a correct session id paired with a wrong HMAC proof.
#[sqlx::test(migrations = "../../migrations/master")]
async fn gate_rejects_a_forged_hash(pool: PgPool) {
    let cfg = test_config();
    let now = Utc::now();

    let identifier = "identifier-for-forged-hash-test";
    let seed = derive_seed(identifier, "Windows", 1, "1", &cfg.magic_key);

    let issued = create(
        &pool,
        &cfg,
        now,
        CreateAccountInput {
            identifier_type: "phone",
            platform_type: "Windows",
            identifier,
            ticks: 1,
            nonce: "1",
            seed: &seed,
        },
    )
    .await
    .unwrap();

    let result = vql_auth::authenticate(&pool, &cfg, now, issued.session_id, "42", b"forged-hash-bytes").await;
    assert!(matches!(result, Err(vql_auth::AuthError::UserAuthFailed)));
}
