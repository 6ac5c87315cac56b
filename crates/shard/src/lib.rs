//! Tenant → shard routing and the process-global connection pool (component C3).

mod config;
mod router;
mod suffix;

pub use config::ShardRouterConfig;
pub use router::{CredentialSet, ShardRouter, ShardRouterError};
pub use suffix::{shard_of, to_suffix, validate_suffix, SHARD_DIVIDE};
