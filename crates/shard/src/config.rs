//! Fixed connection-pool parameters (`spec.md` §4.3, original `internal/db/db.go`).

use std::time::Duration;

/// Pool sizing, visible and overridable in one place rather than scattered
/// literals at each `PgPoolOptions` call site.
#[derive(Debug, Clone, Copy)]
pub struct ShardRouterConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
}

impl Default for ShardRouterConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 10,
            max_lifetime: Duration::from_secs(60 * 60),
        }
    }
}
