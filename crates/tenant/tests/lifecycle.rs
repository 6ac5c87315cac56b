//! Tenant lifecycle against a real Postgres instance (`spec.md` §4.8, §8
//! seed scenario 3, property 7).
//!
//! `vql-tenant` splits the upgrade protocol's master-side steps (T1/T3,
//! owned by `vql-auth`) from its shard-side step (T2, provisioning); in
//! production these run against separate pools, but nothing about the
//! protocol requires physically distinct databases, so these tests point
//! both "master" and "shard" at the same migrated instance.

use chrono::Utc;
use sqlx::PgPool;
use vql_auth::{create, AuthConfig, CreateAccountInput};
use vql_core::TenantId;

fn test_config() -> AuthConfig {
    AuthConfig {
        magic_key: b"test-magic-key".to_vec(),
        session_seed: b"test-session-seed".to_vec(),
        vendor_seed: b"test-vendor-seed".to_vec(),
        session_timeout: chrono::Duration::minutes(30),
    }
}

async fn bootstrap_consumer(pool: &PgPool, identifier: &str) -> TenantId {
    let cfg = test_config();
    let now = Utc::now();
    let seed = vql_codec::derive_seed(identifier, "Windows", 1, "1", &cfg.magic_key);
    let issued = create(
        pool,
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
    issued.tenant_id
}

/// Seed scenario 3: `Upgrade` after a consumer `Create` returns a
/// `vendorCode`/`queueCode` pair and binds the shard index.
#[sqlx::test(migrations = "../../migrations/master")]
async fn upgrade_binds_the_shard_and_mints_the_first_queue(pool: PgPool) {
    let tenant_id = bootstrap_consumer(&pool, "tenant-upgrade-test").await;
    let now = Utc::now();

    let outcome = vql_tenant::upgrade(&pool, &pool, tenant_id, now, "vendor sample", "caption sample", false)
        .await
        .expect("upgrade should succeed for a freshly created consumer");

    assert_eq!(outcome.vendor_code.to_base64().len(), 44);
    assert_eq!(outcome.queue_code.to_base64().len(), 44);

    let (shard, account_type): (i32, i16) = sqlx::query_as(
        "SELECT domain.shard, auth_account.account_type
           FROM domain JOIN auth_account ON auth_account.id = domain.id
          WHERE domain.id = $1",
    )
    .bind(tenant_id.as_u64() as i64)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(shard >= 0, "shard must leave the -1 sentinel once T3 commits");
    assert_eq!(account_type, vql_auth::AccountType::Vendor as i16);
}

/// Property 7: replaying `Upgrade`'s shard-side step after a simulated T2
/// crash (re-running against an already-provisioned shard) does not error.
#[sqlx::test(migrations = "../../migrations/master")]
async fn upgrade_is_safe_to_retry_after_a_crash_between_t2_and_t3(pool: PgPool) {
    let tenant_id = bootstrap_consumer(&pool, "tenant-retry-test").await;
    let now = Utc::now();

    vql_tenant::upgrade(&pool, &pool, tenant_id, now, "vendor sample", "caption sample", false)
        .await
        .unwrap();

    // A retried upgrade call (as a reconciler driving T1-T3 again after a
    // crash would) must not fail with a duplicate-object error even though
    // the shard objects already exist.
    let retried = vql_tenant::upgrade(&pool, &pool, tenant_id, now, "vendor sample", "caption sample", false).await;
    assert!(retried.is_ok(), "retrying upgrade against an already-provisioned shard must succeed");
}

/// `Update` with `requireInitQueue` archives the prior queue and mints a
/// fresh `queueCode`, bumping `resetCount`.
#[sqlx::test(migrations = "../../migrations/master")]
async fn update_with_queue_reset_mints_a_fresh_queue_code(pool: PgPool) {
    let tenant_id = bootstrap_consumer(&pool, "tenant-update-test").await;
    let now = Utc::now();
    let upgraded = vql_tenant::upgrade(&pool, &pool, tenant_id, now, "name one", "caption one", false)
        .await
        .unwrap();

    let updated = vql_tenant::update(&pool, tenant_id, "name two", "caption two", true)
        .await
        .expect("update with requireInitQueue should succeed");

    let new_queue_code = updated.queue_code.expect("reset should mint a queue code");
    assert_ne!(new_queue_code.as_bytes(), upgraded.queue_code.as_bytes());
    assert_eq!(updated.reset_count, Some(1));

    let detail = vql_tenant::detail(&pool, tenant_id).await.unwrap();
    assert_eq!(detail.name, "name two");
    assert_eq!(detail.caption, "caption two");
}

/// `Update` without a reset leaves the queue code untouched.
#[sqlx::test(migrations = "../../migrations/master")]
async fn update_without_reset_only_renames(pool: PgPool) {
    let tenant_id = bootstrap_consumer(&pool, "tenant-rename-test").await;
    let now = Utc::now();
    vql_tenant::upgrade(&pool, &pool, tenant_id, now, "name one", "caption one", false)
        .await
        .unwrap();

    let updated = vql_tenant::update(&pool, tenant_id, "name two", "caption two", false)
        .await
        .unwrap();

    assert!(updated.queue_code.is_none());
    assert!(updated.reset_count.is_none());
}

/// `DropVendor` soft-deletes the master domain row even when the shard
/// teardown step fails (best-effort, `spec.md` §4.5).
#[sqlx::test(migrations = "../../migrations/master")]
async fn drop_vendor_soft_deletes_the_domain_row(pool: PgPool) {
    let tenant_id = bootstrap_consumer(&pool, "tenant-drop-test").await;
    let now = Utc::now();
    vql_tenant::upgrade(&pool, &pool, tenant_id, now, "name", "caption", false)
        .await
        .unwrap();

    vql_tenant::drop_vendor(&pool, &pool, tenant_id, now).await.unwrap();

    let delete_flag: bool = sqlx::query_scalar("SELECT delete_flag FROM domain WHERE id = $1")
        .bind(tenant_id.as_u64() as i64)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(delete_flag);
}

/// `Purge` is a documented placeholder: it always reports not implemented.
#[tokio::test]
async fn purge_is_not_implemented() {
    let result = vql_tenant::purge(TenantId::new(1)).await;
    assert!(matches!(result, Err(vql_tenant::TenantError::NotImplemented)));
}
