use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("refusing to provision with invalid suffix")]
    InvalidSuffix,
    #[error("schema DDL failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}
