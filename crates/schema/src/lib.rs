//! Idempotent per-tenant schema provisioning (component C4, `spec.md` §4.4).

mod ddl;
mod error;
mod provisioner;
mod teardown;

pub use error::ProvisionError;
pub use provisioner::provision;
pub use teardown::drop_tenant_schema;
