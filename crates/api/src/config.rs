//! Process-wide startup configuration (`spec.md` §6).
//!
//! Loaded once in `main.rs` from the environment and handed down as
//! `Arc<AppConfig>`, mirroring the teacher's pattern of reading a single
//! secret in `main.rs` with a logged insecure-default fallback for local
//! development (never silently weakening production behavior).

use chrono::Duration;
use vql_auth::AuthConfig;

/// `ServicePrefix` names the master/shard database family
/// (`<prefix>_master`, `<prefix>_shard_<00..1f>`, `spec.md` §6).
pub struct AppConfig {
    pub service_prefix: String,
    pub auth: AuthConfig,
    pub normal_master_url: String,
    pub normal_shard_url_base: String,
    pub operator_master_url: String,
    pub operator_shard_url_base: String,
    /// Collapse sensitive failures to `SecSquashed` on the wire. Default
    /// `true` for every authenticated route (`spec.md` §4.2); only ever
    /// disabled for local debugging.
    pub security_squash: bool,
}

impl AppConfig {
    /// Read every setting from the environment. Panics on a missing
    /// required variable: a fatal initialization failure terminates the
    /// process per `spec.md` §6, and there is no safe default for a
    /// database URL or an HMAC key.
    pub fn from_env() -> Self {
        let service_prefix = env_or("VQL_SERVICE_PREFIX", "vql");

        let magic_key = std::env::var("VQL_MAGIC_KEY").unwrap_or_else(|_| {
            tracing::warn!("VQL_MAGIC_KEY not set; using insecure dev default");
            "dev-magic-key".to_string()
        });
        let session_seed = std::env::var("VQL_SESSION_SEED").unwrap_or_else(|_| {
            tracing::warn!("VQL_SESSION_SEED not set; using insecure dev default");
            "dev-session-seed".to_string()
        });
        let vendor_seed = std::env::var("VQL_VENDOR_SEED").unwrap_or_else(|_| {
            tracing::warn!("VQL_VENDOR_SEED not set; using insecure dev default");
            "dev-vendor-seed".to_string()
        });
        let session_timeout_minutes: i64 = std::env::var("VQL_SESSION_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            normal_master_url: require_env("VQL_NORMAL_MASTER_URL"),
            normal_shard_url_base: require_env("VQL_NORMAL_SHARD_URL_BASE"),
            operator_master_url: require_env("VQL_OPERATOR_MASTER_URL"),
            operator_shard_url_base: require_env("VQL_OPERATOR_SHARD_URL_BASE"),
            auth: AuthConfig {
                magic_key: magic_key.into_bytes(),
                session_seed: session_seed.into_bytes(),
                vendor_seed: vendor_seed.into_bytes(),
                session_timeout: Duration::minutes(session_timeout_minutes),
            },
            service_prefix,
            security_squash: true,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}
