// src/domain/project/configuration.rs

use crate::domain::identifier::ViewName;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Database engine hosting the views.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Postgres,
    DuckDB,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1))]
    pub name: String,
    pub version: String,
    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default)]
    pub engine: Engine,

    /// Searched in order, first `<view>.sql` match wins.
    #[validate(length(min = 1, message = "at least one script path is required"))]
    #[serde(rename = "script-paths", default = "default_script_paths")]
    pub script_paths: Vec<String>,

    #[validate(custom(function = "validate_identifier"))]
    #[serde(rename = "metadata-table", default = "default_metadata_table")]
    pub metadata_table: String,

    #[serde(rename = "config-paths", default = "default_config_paths")]
    pub config_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,
}

fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    ViewName::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_identifier"))
}

fn default_profile() -> String {
    "dev".to_string()
}
fn default_script_paths() -> Vec<String> {
    vec![
        "sql/stage_silver".to_string(),
        "sql/consumption_gold".to_string(),
    ]
}
fn default_metadata_table() -> String {
    "metadata_object_dependencies".to_string()
}
fn default_config_paths() -> Vec<String> {
    vec!["config".to_string()]
}
fn default_target_path() -> String {
    "target".to_string()
}
