// viewsmith/src/commands/session.rs
//
// Opens the single database session a command works with.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use viewsmith_core::domain::project::{Engine, ProjectConfig};
use viewsmith_core::infrastructure::adapters::{DuckDBConnector, PostgresConnector};
use viewsmith_core::infrastructure::config::{load_connections, resolve_output};
use viewsmith_core::ports::connector::Connector;

pub async fn open(
    project_dir: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<Box<dyn Connector>> {
    let connections = load_connections(project_dir, config)
        .with_context(|| format!("Failed to load connections for {:?}", project_dir))?;
    let output = resolve_output(&connections, config, |key| std::env::var(key).ok())?;

    let connector: Box<dyn Connector> = match config.engine {
        Engine::Postgres => {
            let settings = output.postgres_settings()?;
            info!(
                host = %settings.host,
                port = settings.port,
                database = %settings.database,
                "Connecting to PostgreSQL"
            );
            Box::new(
                PostgresConnector::connect(&settings)
                    .await
                    .with_context(|| {
                        format!("Failed to connect to {}:{}", settings.host, settings.port)
                    })?,
            )
        }
        Engine::DuckDB => {
            let db_path = output.duckdb_path(project_dir)?;
            info!(path = %db_path, "Opening DuckDB");
            Box::new(
                DuckDBConnector::new(&db_path)
                    .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?,
            )
        }
    };

    Ok(connector)
}
