// viewsmith-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["viewsmith.yaml", "viewsmith_project_conf.yaml"];

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Discovery
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig =
        serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
            path: config_path.display().to_string(),
            source,
        })?;

    // 3. Layering: VIEWSMITH_PROFILE=prod viewsmith recreate
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    // 4. Fail before touching the database
    config.validate()?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("VIEWSMITH_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("VIEWSMITH_PROFILE") {
        info!(old = ?config.profile, new = ?val, "Overriding profile via ENV");
        config.profile = val;
    }
}
