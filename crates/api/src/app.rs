//! Axum router wiring (`spec.md` §6 route table).
//!
//! Mirrors the teacher's `app::build_app` shape: one function that takes
//! whatever state the handlers need and returns a fully wired `Router`.
//! There is no auth middleware layer here (`spec.md` §4.6: the gate needs
//! the resolved `TenantId` in hand before a handler can pick a shard pool,
//! so each authenticated handler calls [`crate::context::authenticate`]
//! directly rather than going through a `tower::Layer`).

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::{consumer_queue, new_logon, operator, vendor_queue};
use crate::state::AppState;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/new", post(new_logon::create))
        .route("/logon", post(new_logon::logon))
        .route("/on/queue", post(consumer_queue::enqueue))
        .route("/on/queue/:vendorCode/:queueCode", get(consumer_queue::show_queue))
        .route("/on/dequeue", post(consumer_queue::cancel))
        .route("/on/vendor/upgrade", post(vendor_queue::upgrade))
        .route("/on/vendor/queue/new", post(vendor_queue::update))
        .route("/on/vendor/queue/dummy", post(vendor_queue::dummy))
        .route("/on/vendor/manage/:queueCode/:page", get(vendor_queue::manage))
        .route("/on/vendor/queue/:queueCode/:page", get(vendor_queue::waiting_list))
        .route("/on/vendor/dequeue", post(vendor_queue::dequeue))
        .route("/on/priv/vendor", delete(operator::drop_vendor))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
