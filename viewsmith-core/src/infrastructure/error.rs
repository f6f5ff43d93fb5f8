// viewsmith-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("PostgreSQL Error: {0}")]
    #[diagnostic(
        code(viewsmith::infra::database::postgres),
        help("Check the connection settings in connections.yml and the SQL being executed.")
    )]
    Postgres(#[from] sqlx::Error),

    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(viewsmith::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(viewsmith::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in {path}: {source}")]
    #[diagnostic(
        code(viewsmith::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(viewsmith::infra::validation))]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(viewsmith::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Shortcuts so adapters can use `?` on driver calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<sqlx::Error> for InfrastructureError {
    fn from(err: sqlx::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Postgres(err))
    }
}
