// viewsmith-core/src/infrastructure/scripts.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::identifier::ViewName;
use crate::domain::ports::ScriptSource;

/// Looks up `<dir>/<view>.sql` in each search directory, first match wins.
#[derive(Debug, Clone)]
pub struct FsScriptLoader {
    search_paths: Vec<PathBuf>,
}

impl FsScriptLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Script paths from the project config, resolved against the project dir.
    pub fn from_project(project_dir: &Path, script_paths: &[String]) -> Self {
        Self::new(script_paths.iter().map(|p| project_dir.join(p)).collect())
    }

    fn searched(&self) -> String {
        self.search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ScriptSource for FsScriptLoader {
    fn load(&self, view: &ViewName) -> Result<String, DomainError> {
        let file_name = format!("{}.sql", view.as_str());

        for dir in &self.search_paths {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                debug!(path = ?candidate, "Resolved SQL script");
                return fs::read_to_string(&candidate).map_err(|e| {
                    DomainError::ScriptUnreadable {
                        view: view.to_string(),
                        reason: format!("{}: {}", candidate.display(), e),
                    }
                });
            }
        }

        Err(DomainError::ScriptNotFound {
            view: view.to_string(),
            searched: self.searched(),
        })
    }
}
