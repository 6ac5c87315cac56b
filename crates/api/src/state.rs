use std::sync::Arc;

use vql_shard::ShardRouter;

use crate::config::AppConfig;

/// Shared, read-only application state handed to every handler
/// (`spec.md` §5: "a process-global router... read-only after
/// initialization, safe to share").
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ShardRouter>,
    pub config: Arc<AppConfig>,
}
