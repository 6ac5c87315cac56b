//! Queue state machine against a real Postgres instance (`spec.md` §4.7,
//! §8 properties 1-3 and seed scenarios 3-6).
//!
//! `vql-queue` deliberately does not depend on `vql-schema` as a library
//! (layering: the queue engine assumes a provisioned shard), so these tests
//! reach for `vql-schema::provision` themselves as setup.

use sqlx::PgPool;
use vql_codec::mint_code;
use vql_core::TenantId;
use vql_queue::{cancel, dequeue, enqueue, enqueue_dummy, init_queue, manage, show_queue, QueueError, QueueStatus};

async fn provisioned_tenant(pool: &PgPool, id: u64) -> TenantId {
    let tenant_id = TenantId::new(id);
    let mut tx = pool.begin().await.unwrap();
    vql_schema::provision(&mut tx, tenant_id, "vendor sample", "caption sample")
        .await
        .unwrap();
    let init = init_queue(&mut tx, tenant_id, true).await.unwrap();
    tx.commit().await.unwrap();
    let _ = init;
    tenant_id
}

async fn queue_code_of(pool: &PgPool, tenant_id: TenantId) -> vql_codec::Code {
    let suffix = vql_shard::to_suffix(tenant_id);
    let raw: Vec<u8> = sqlx::query_scalar(&format!("SELECT queue_code FROM summary_{suffix} WHERE id = 1"))
        .fetch_one(pool)
        .await
        .unwrap();
    vql_codec::Code(raw.try_into().unwrap())
}

/// Seed scenario 3: upgrade + first enqueue.
#[sqlx::test]
async fn first_enqueue_after_upgrade_reports_prefix_one(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 1).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(1001);

    let outcome = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();

    assert_eq!(outcome.keycode_prefix, 1);
    assert_eq!(outcome.persons_waiting_before, 0);
    assert_eq!(outcome.total_waiting, 1);
}

/// Property 3: a consumer cannot hold two live rows for the same queue.
#[sqlx::test]
async fn a_consumer_cannot_enqueue_twice_while_still_waiting(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 2).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(2001);

    enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    let second = enqueue(&pool, tenant_id, queue_code, consumer).await;

    assert!(matches!(second, Err(QueueError::AlreadyEnqueued)));
}

/// Once the first row is resolved (cancelled), the same consumer may
/// enqueue again: the invariant is "at most one *live* row", not "ever".
#[sqlx::test]
async fn re_enqueue_is_allowed_after_the_prior_row_is_cancelled(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 3).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(3001);

    let first = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    cancel(&pool, tenant_id, queue_code, consumer, first.keycode_prefix)
        .await
        .unwrap();

    let second = enqueue(&pool, tenant_id, queue_code, consumer)
        .await
        .expect("a resolved row must not block re-enqueue");
    assert_eq!(second.keycode_prefix, 2);
}

/// Seed scenario 4: three dummy enqueues bump the prefix to 2, 3, 4; the
/// consumer's own row still shows 0 ahead of it since dummies come after.
#[sqlx::test]
async fn three_dummy_enqueues_then_consumer_cancel(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 4).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(4001);

    let consumer_outcome = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    assert_eq!(consumer_outcome.keycode_prefix, 1);

    for expected_prefix in [2, 3, 4] {
        let dummy = enqueue_dummy(&pool, tenant_id, queue_code).await.unwrap();
        assert_eq!(dummy.keycode_prefix, expected_prefix);
    }

    let shown = show_queue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    assert!(matches!(shown.status, QueueStatus::Enqueued));
    assert_eq!(shown.persons_waiting_before, Some(0));
    assert_eq!(shown.total_waiting, Some(4));

    let cancelled = cancel(&pool, tenant_id, queue_code, consumer, consumer_outcome.keycode_prefix)
        .await
        .unwrap();
    assert!(cancelled.updated);

    let shown_after = show_queue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    assert!(matches!(shown_after.status, QueueStatus::Cancelled));
    assert_eq!(shown_after.persons_waiting_before, None);
}

/// A second `Cancel` against an already-resolved row reports `updated = false`
/// rather than erroring — only a matching, still-`Enqueued` row is ever
/// transitioned (`spec.md` §4.7).
#[sqlx::test]
async fn cancelling_an_already_cancelled_row_fails_cleanly(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 5).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(5001);

    let outcome = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    cancel(&pool, tenant_id, queue_code, consumer, outcome.keycode_prefix)
        .await
        .unwrap();

    let second = cancel(&pool, tenant_id, queue_code, consumer, outcome.keycode_prefix).await;
    assert!(matches!(second, Err(QueueError::UserDequeueFailed)));
}

/// Seed scenario 5: polite vendor dequeue with admit; a second identical
/// call reports `updated = false` (not an error) since there is nothing
/// left to transition.
#[sqlx::test]
async fn polite_vendor_dequeue_is_idempotent(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 6).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(6001);

    let outcome = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();

    let suffix = vql_shard::to_suffix(tenant_id);
    sqlx::query(&format!(
        "UPDATE queue_{suffix} SET keycode_suffix = 'suffix_test' WHERE keycode_prefix = $1"
    ))
    .bind(outcome.keycode_prefix)
    .execute(&pool)
    .await
    .unwrap();

    let first = dequeue(&pool, tenant_id, false, outcome.keycode_prefix, Some("suffix_test"))
        .await
        .unwrap();
    assert!(first.updated);

    let second = dequeue(&pool, tenant_id, false, outcome.keycode_prefix, Some("suffix_test"))
        .await
        .unwrap();
    assert!(!second.updated);
}

/// Seed scenario 6: force vendor dequeue ignores the suffix.
#[sqlx::test]
async fn force_vendor_dequeue_ignores_the_suffix(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 7).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(7001);

    let outcome = enqueue(&pool, tenant_id, queue_code, consumer).await.unwrap();

    let result = dequeue(&pool, tenant_id, true, outcome.keycode_prefix, Some(""))
        .await
        .unwrap();
    assert!(result.updated);

    let shown = show_queue(&pool, tenant_id, queue_code, consumer).await.unwrap();
    assert!(matches!(shown.status, QueueStatus::Dequeued));
}

/// Property 2: FIFO order among `Enqueued` rows is ascending insertion id,
/// and `Manage` reports the same ordering plus the running totals.
#[sqlx::test]
async fn manage_lists_waiting_consumers_in_fifo_order(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 8).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;

    let mut prefixes = Vec::new();
    for _ in 0..3 {
        let outcome = enqueue_dummy(&pool, tenant_id, queue_code).await.unwrap();
        prefixes.push(outcome.keycode_prefix);
    }

    let page = manage(&pool, tenant_id, queue_code, 0).await.unwrap();
    let seen: Vec<i64> = page.entries.iter().map(|e| e.keycode_prefix).collect();
    assert_eq!(seen, prefixes, "manage must list rows in FIFO (ascending id) order");
    assert_eq!(page.queuing_total, 3);
}

/// `ShowQueue` against an unknown `queueCode` is `KeyCodeCodeNotfound`.
#[sqlx::test]
async fn show_queue_with_an_unknown_queue_code_fails(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 9).await;
    let bogus_queue_code = mint_code();
    let consumer = TenantId::new(9001);

    let result = show_queue(&pool, tenant_id, bogus_queue_code, consumer).await;
    assert!(matches!(result, Err(QueueError::KeyCodeCodeNotfound)));
}

/// Enqueue against a queue in maintenance is rejected up front.
#[sqlx::test]
async fn enqueue_against_a_queue_in_maintenance_is_rejected(pool: PgPool) {
    let tenant_id = provisioned_tenant(&pool, 10).await;
    let queue_code = queue_code_of(&pool, tenant_id).await;
    let consumer = TenantId::new(10001);

    let suffix = vql_shard::to_suffix(tenant_id);
    sqlx::query(&format!("UPDATE summary_{suffix} SET maintenance = TRUE WHERE id = 1"))
        .execute(&pool)
        .await
        .unwrap();

    let result = enqueue(&pool, tenant_id, queue_code, consumer).await;
    assert!(matches!(result, Err(QueueError::QueueMaintenance)));
}
