// viewsmith-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewsmithError {
    // --- DOMAIN (scripts, identifiers) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (database, IO, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Database session is closed")]
    SessionClosed,
}

impl From<std::io::Error> for ViewsmithError {
    fn from(err: std::io::Error) -> Self {
        ViewsmithError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for ViewsmithError {
    fn from(err: duckdb::Error) -> Self {
        ViewsmithError::Infrastructure(InfrastructureError::from(err))
    }
}

impl From<sqlx::Error> for ViewsmithError {
    fn from(err: sqlx::Error) -> Self {
        ViewsmithError::Infrastructure(InfrastructureError::from(err))
    }
}
