use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::project::{Engine, ProjectConfig};
use crate::infrastructure::adapters::postgres::PostgresSettings;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionProfile {
    pub target: String,
    pub outputs: HashMap<String, ConnectionOutput>,
}

#[derive(Deserialize, Clone)]
pub struct ConnectionOutput {
    #[serde(rename = "type")]
    pub output_type: Engine,
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// DuckDB database file.
    pub path: Option<String>,
}

impl std::fmt::Debug for ConnectionOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOutput")
            .field("output_type", &self.output_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("path", &self.path)
            .finish()
    }
}

fn default_port() -> u16 {
    5432
}

impl ConnectionOutput {
    pub fn postgres_settings(&self) -> Result<PostgresSettings, InfrastructureError> {
        let user = self.user.clone().ok_or_else(|| {
            InfrastructureError::ConfigError("postgres output requires 'user'".into())
        })?;
        let database = self.database.clone().ok_or_else(|| {
            InfrastructureError::ConfigError("postgres output requires 'database'".into())
        })?;

        Ok(PostgresSettings {
            host: self.host.clone().unwrap_or_else(|| "localhost".to_string()),
            port: self.port,
            user,
            password: self.password.clone(),
            database,
        })
    }

    /// `path`, falling back to `database`, relative paths resolved against the project dir.
    pub fn duckdb_path(&self, project_dir: &Path) -> Result<String, InfrastructureError> {
        let raw = self
            .path
            .as_deref()
            .or(self.database.as_deref())
            .ok_or_else(|| {
                InfrastructureError::ConfigError("duckdb output requires 'path'".into())
            })?;

        if raw == ":memory:" || Path::new(raw).is_absolute() {
            Ok(raw.to_string())
        } else {
            Ok(project_dir.join(raw).to_string_lossy().into_owned())
        }
    }
}

pub fn load_connections(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<HashMap<String, ConnectionProfile>, InfrastructureError> {
    let config_subpath = config
        .config_paths
        .first()
        .map(|s: &String| s.as_str())
        .unwrap_or("config");
    let config_dir = project_dir.join(config_subpath);

    // Support yml/yaml
    let paths = [
        config_dir.join("connections.yml"),
        config_dir.join("connections.yaml"),
    ];
    let connections_path = paths.iter().find(|p| p.exists()).ok_or_else(|| {
        InfrastructureError::ConfigNotFound(format!(
            "connections.yml or connections.yaml in {:?}",
            config_dir
        ))
    })?;

    let content = fs::read_to_string(connections_path)?;
    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
        path: connections_path.display().to_string(),
        source,
    })
}

/// Picks the output for this project: profile named after the project, output
/// named after `config.profile`, else the profile's own `target`.
pub fn resolve_output<F>(
    connections: &HashMap<String, ConnectionProfile>,
    config: &ProjectConfig,
    lookup_env: F,
) -> Result<ConnectionOutput, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let profile = connections.get(&config.name).ok_or_else(|| {
        InfrastructureError::ConfigError(format!(
            "No connection profile named '{}' in connections file",
            config.name
        ))
    })?;

    let (output_name, output) = profile
        .outputs
        .get_key_value(&config.profile)
        .or_else(|| profile.outputs.get_key_value(&profile.target))
        .ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "Profile '{}' has no output '{}' (target '{}')",
                config.name, config.profile, profile.target
            ))
        })?;

    if output.output_type != config.engine {
        return Err(InfrastructureError::ConfigError(format!(
            "Output '{}' is of type {:?} but the project engine is {:?}",
            output_name, output.output_type, config.engine
        )));
    }

    let mut output = output.clone();
    if let Some(password) = lookup_env("VIEWSMITH_DB_PASSWORD") {
        info!(output = %output_name, "Using database password from VIEWSMITH_DB_PASSWORD");
        output.password = Some(password);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const CONNECTIONS: &str = r#"
analytics:
  target: dev
  outputs:
    dev:
      type: postgres
      host: db.internal
      user: etl
      password: from_yaml
      database: warehouse
    prod:
      type: postgres
      port: 6432
      user: etl_prod
      database: warehouse
    local:
      type: duckdb
      path: local.duckdb
"#;

    fn project(yaml: &str) -> Result<ProjectConfig> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_connections(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir.join("config"))?;
        fs::write(dir.join("config/connections.yml"), CONNECTIONS)?;
        Ok(())
    }

    #[test]
    fn test_resolves_profile_output() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config = project("name: analytics\nversion: '1'\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let output = resolve_output(&connections, &config, no_env)?;
        let settings = output.postgres_settings()?;

        assert_eq!(settings.host, "db.internal");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.user, "etl");
        assert_eq!(settings.password.as_deref(), Some("from_yaml"));
        assert_eq!(settings.database, "warehouse");
        Ok(())
    }

    #[test]
    fn test_unknown_profile_falls_back_to_target() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config = project("name: analytics\nversion: '1'\nprofile: staging\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let output = resolve_output(&connections, &config, no_env)?;
        assert_eq!(output.host.as_deref(), Some("db.internal"));
        Ok(())
    }

    #[test]
    fn test_password_from_env_and_defaults() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config = project("name: analytics\nversion: '1'\nprofile: prod\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let output = resolve_output(&connections, &config, |key| {
            (key == "VIEWSMITH_DB_PASSWORD").then(|| "from_env".to_string())
        })?;
        let settings = output.postgres_settings()?;

        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 6432);
        assert_eq!(settings.password.as_deref(), Some("from_env"));
        assert!(!format!("{:?}", output).contains("from_env"));
        Ok(())
    }

    #[test]
    fn test_engine_mismatch_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config = project("name: analytics\nversion: '1'\nprofile: local\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let result = resolve_output(&connections, &config, no_env);
        assert!(matches!(result, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }

    #[test]
    fn test_duckdb_path_is_project_relative() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config =
            project("name: analytics\nversion: '1'\nprofile: local\nengine: duckdb\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let output = resolve_output(&connections, &config, no_env)?;
        assert_eq!(
            output.duckdb_path(dir.path())?,
            dir.path().join("local.duckdb").to_string_lossy()
        );
        Ok(())
    }

    #[test]
    fn test_missing_connections_file() -> Result<()> {
        let dir = tempdir()?;
        let config = project("name: analytics\nversion: '1'\n")?;
        let result = load_connections(dir.path(), &config);
        assert!(matches!(result, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_missing_profile() -> Result<()> {
        let dir = tempdir()?;
        write_connections(dir.path())?;
        let config = project("name: other_project\nversion: '1'\n")?;

        let connections = load_connections(dir.path(), &config)?;
        let result = resolve_output(&connections, &config, no_env);
        assert!(matches!(result, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }
}
