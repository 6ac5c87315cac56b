//! Idempotent per-tenant provisioning (`spec.md` §4.4, §8 property 7).

use sqlx::PgPool;
use vql_core::TenantId;
use vql_schema::provision;

#[sqlx::test]
async fn provisioning_twice_is_a_no_op(pool: PgPool) {
    let tenant_id = TenantId::new(4242);

    let mut tx = pool.begin().await.unwrap();
    provision(&mut tx, tenant_id, "vendor sample", "caption sample")
        .await
        .expect("first provision should succeed");
    tx.commit().await.unwrap();

    // Replaying provisioning (as a crash-recovery retry of T2 would,
    // `spec.md` §4.8) must not fail with a duplicate-object error.
    let mut tx = pool.begin().await.unwrap();
    provision(&mut tx, tenant_id, "vendor sample", "caption sample")
        .await
        .expect("re-running provision against an already-provisioned shard must be a no-op");
    tx.commit().await.unwrap();

    let suffix = vql_shard::to_suffix(tenant_id);
    let summary_rows: i64 = sqlx::query_scalar(&format!("SELECT count(*) FROM summary_{suffix}"))
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(summary_rows, 1, "re-provisioning must not duplicate the singleton summary row");

    let sequence_value: i64 = sqlx::query_scalar(&format!("SELECT curr FROM sequence_{suffix} WHERE name = 'NUM'"))
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sequence_value, 0, "re-seeding must not reset an already-advanced sequence");
}

#[sqlx::test]
async fn the_nextseq_function_is_strictly_monotonic(pool: PgPool) {
    let tenant_id = TenantId::new(7);
    let mut tx = pool.begin().await.unwrap();
    provision(&mut tx, tenant_id, "v", "c").await.unwrap();
    tx.commit().await.unwrap();

    let suffix = vql_shard::to_suffix(tenant_id);
    let mut previous = 0i64;
    for _ in 0..5 {
        let next: i64 = sqlx::query_scalar(&format!("SELECT nextseq_{suffix}($1)"))
            .bind("NUM")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(next > previous, "nextseq must be strictly increasing");
        previous = next;
    }
}
