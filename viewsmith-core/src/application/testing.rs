// Test doubles shared by the application tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::error::DomainError;
use crate::domain::graph::DependencyEdge;
use crate::domain::identifier::ViewName;
use crate::domain::ports::ScriptSource;
use crate::error::ViewsmithError;
use crate::ports::connector::Connector;

/// Records every call as a line (`EXECUTE <sql>`, `COMMIT`, `ROLLBACK`, `CLOSE`).
/// Statements containing one of `fail_on` fail.
#[derive(Default)]
pub struct MockConnector {
    edges: Vec<DependencyEdge>,
    fail_on: Vec<String>,
    calls: Mutex<Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

impl MockConnector {
    pub fn with_edges(edges: Vec<DependencyEdge>) -> Self {
        Self {
            edges,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on.push(fragment.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Only the `EXECUTE` lines, without the prefix.
    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("EXECUTE ").map(str::to_string))
            .collect()
    }

    pub fn fetched_tables(&self) -> Vec<String> {
        self.fetched.lock().map(|f| f.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn execute(&self, sql: &str) -> Result<(), ViewsmithError> {
        self.record(format!("EXECUTE {}", sql));
        if self.fail_on.iter().any(|f| sql.contains(f.as_str())) {
            return Err(std::io::Error::other(format!("mock failure on: {}", sql)).into());
        }
        Ok(())
    }

    async fn commit(&self) -> Result<(), ViewsmithError> {
        self.record("COMMIT".to_string());
        Ok(())
    }

    async fn rollback(&self) -> Result<(), ViewsmithError> {
        self.record("ROLLBACK".to_string());
        Ok(())
    }

    async fn fetch_dependencies(
        &self,
        metadata_table: &str,
    ) -> Result<Vec<DependencyEdge>, ViewsmithError> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(metadata_table.to_string());
        }
        Ok(self.edges.clone())
    }

    async fn close(&self) -> Result<(), ViewsmithError> {
        self.record("CLOSE".to_string());
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "mock"
    }
}

/// In-memory scripts keyed by view name.
#[derive(Default)]
pub struct MockScripts {
    scripts: HashMap<String, String>,
}

impl MockScripts {
    /// A `CREATE VIEW <v> AS SELECT 1` script for each view.
    pub fn for_views(views: &[&str]) -> Self {
        Self {
            scripts: views
                .iter()
                .map(|v| (v.to_string(), create_sql(v)))
                .collect(),
        }
    }
}

pub fn create_sql(view: &str) -> String {
    format!("CREATE VIEW {} AS SELECT 1 AS x;", view)
}

impl ScriptSource for MockScripts {
    fn load(&self, view: &ViewName) -> Result<String, DomainError> {
        self.scripts
            .get(view.as_str())
            .cloned()
            .ok_or_else(|| DomainError::ScriptNotFound {
                view: view.to_string(),
                searched: "memory".to_string(),
            })
    }
}
