//! Process-global connection pool (`spec.md` §4.3, §5).
//!
//! Stateless between operations: once built, a [`ShardRouter`] is read-only
//! and safe to share behind an `Arc` across every request handler.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use vql_core::TenantId;

use crate::config::ShardRouterConfig;
use crate::suffix::{shard_of, SHARD_DIVIDE};

#[derive(Debug, Error)]
pub enum ShardRouterError {
    #[error("shard connect failed: {0}")]
    ConnectFailed(#[from] sqlx::Error),
}

/// Which credential set a pool was opened with (`spec.md` §4.3: "two handle
/// sets, normal user credentials and operator credentials").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSet {
    Normal,
    Operator,
}

/// One master pool plus `N=32` shard pools, opened under a single credential set.
struct Handles {
    master: PgPool,
    shards: Vec<PgPool>,
}

/// The process-global router: a master handle and 32 shard handles, for
/// each of the normal and operator credential sets.
pub struct ShardRouter {
    normal: Handles,
    operator: Handles,
}

impl ShardRouter {
    /// Open the master pool and all 32 shard pools for both credential sets.
    ///
    /// `master_url` / `shard_url(index)` build the Postgres connection
    /// string for the master and for shard `index` respectively; callers
    /// typically vary only the user/password between the normal and
    /// operator credential sets (`spec.md` §4.3).
    pub async fn connect(
        config: ShardRouterConfig,
        normal_master_url: &str,
        normal_shard_url: impl Fn(u16) -> String,
        operator_master_url: &str,
        operator_shard_url: impl Fn(u16) -> String,
    ) -> Result<Self, ShardRouterError> {
        let normal = Handles::connect(&config, normal_master_url, normal_shard_url).await?;
        let operator = Handles::connect(&config, operator_master_url, operator_shard_url).await?;
        Ok(Self { normal, operator })
    }

    pub fn master(&self, creds: CredentialSet) -> &PgPool {
        match creds {
            CredentialSet::Normal => &self.normal.master,
            CredentialSet::Operator => &self.operator.master,
        }
    }

    /// Resolve the shard pool owning `tenant_id` (`shardOf(id) = id mod N`).
    pub fn shard(&self, creds: CredentialSet, tenant_id: TenantId) -> &PgPool {
        let index = shard_of(tenant_id) as usize;
        let handles = match creds {
            CredentialSet::Normal => &self.normal,
            CredentialSet::Operator => &self.operator,
        };
        &handles.shards[index]
    }
}

impl Handles {
    async fn connect(
        config: &ShardRouterConfig,
        master_url: &str,
        shard_url: impl Fn(u16) -> String,
    ) -> Result<Self, ShardRouterError> {
        let options = || {
            PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .max_lifetime(config.max_lifetime)
        };

        let master = options().connect(master_url).await?;

        let mut shards = Vec::with_capacity(SHARD_DIVIDE as usize);
        for index in 0..SHARD_DIVIDE {
            let pool = options().connect(&shard_url(index)).await?;
            shards.push(pool);
        }

        Ok(Self { master, shards })
    }
}
