// viewsmith-core/src/application/report.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::graph::ViewOrdering;
use crate::error::ViewsmithError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const REPORT_FILE: &str = "recreate_report.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewStatus {
    Succeeded,
    Failed { error: String },
    /// Dry run: the statement was printed, not executed.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOutcome {
    pub view: String,
    #[serde(flatten)]
    pub status: ViewStatus,
}

impl ViewOutcome {
    pub fn new(view: &str, status: ViewStatus) -> Self {
        Self {
            view: view.to_string(),
            status,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, ViewStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecreationReport {
    pub engine: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ordering: ViewOrdering,
    pub dropped: Vec<ViewOutcome>,
    pub recreated: Vec<ViewOutcome>,
}

impl RecreationReport {
    pub fn drop_failures(&self) -> usize {
        self.dropped.iter().filter(|o| o.is_failure()).count()
    }

    pub fn recreate_failures(&self) -> usize {
        self.recreated.iter().filter(|o| o.is_failure()).count()
    }

    /// Writes the report as pretty JSON into `target_dir`.
    pub fn save(&self, target_dir: &Path) -> Result<PathBuf, ViewsmithError> {
        let json = serde_json::to_string_pretty(self).map_err(InfrastructureError::from)?;
        let path = target_dir.join(REPORT_FILE);
        atomic_write(&path, json)?;
        Ok(path)
    }
}
