use std::sync::Arc;

use vql_api::config::AppConfig;
use vql_api::state::AppState;
use vql_shard::{ShardRouter, ShardRouterConfig};

#[tokio::main]
async fn main() {
    vql_observability::init();

    let config = AppConfig::from_env();

    let router = match connect_router(&config).await {
        Ok(router) => router,
        Err(e) => {
            tracing::error!(error = %e, "fatal: could not open master/shard pools");
            std::process::exit(1);
        }
    };

    let state = AppState {
        router: Arc::new(router),
        config: Arc::new(config),
    };

    let app = vql_api::build_app(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Open the master pool and all 32 shard pools, for both the normal and
/// operator credential sets (`spec.md` §4.3, §6).
async fn connect_router(config: &AppConfig) -> Result<ShardRouter, vql_shard::ShardRouterError> {
    let normal_shard_base = config.normal_shard_url_base.clone();
    let operator_shard_base = config.operator_shard_url_base.clone();

    ShardRouter::connect(
        ShardRouterConfig::default(),
        &config.normal_master_url,
        move |index| shard_url(&normal_shard_base, index),
        &config.operator_master_url,
        move |index| shard_url(&operator_shard_base, index),
    )
    .await
}

/// `<prefix>_shard_<00..1f>` (`spec.md` §6): `base` already carries
/// everything up to and including the `_shard_` segment and the trailing
/// `@host/` of the connection string; only the two-digit hex shard index
/// varies per pool.
fn shard_url(base: &str, index: u16) -> String {
    format!("{base}{index:02x}")
}
