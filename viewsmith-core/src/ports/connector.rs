// viewsmith-core/src/ports/connector.rs

// The database session as the use cases see it. Adapters (Postgres, DuckDB)
// decide how statements, transactions and the metadata query are carried out.

use crate::domain::graph::DependencyEdge;
use crate::error::ViewsmithError;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs one SQL script (possibly several statements) inside the current
    /// transaction, opening one if none is active.
    async fn execute(&self, sql: &str) -> Result<(), ViewsmithError>;

    async fn commit(&self) -> Result<(), ViewsmithError>;

    /// No-op when no transaction is open.
    async fn rollback(&self) -> Result<(), ViewsmithError>;

    /// `(object_name, depends_on)` rows of view-on-view dependencies stored in
    /// `metadata_table`. Rows whose dependency is a table are excluded.
    async fn fetch_dependencies(
        &self,
        metadata_table: &str,
    ) -> Result<Vec<DependencyEdge>, ViewsmithError>;

    /// Releases the session. Later calls fail.
    async fn close(&self) -> Result<(), ViewsmithError>;

    fn engine_name(&self) -> &str;
}

/// Dependency query shared by every adapter. `metadata_table` must already be
/// a validated identifier.
pub fn dependency_query(metadata_table: &str) -> String {
    format!(
        "SELECT object_name, depends_on FROM {} WHERE object_type = 'view' AND depends_on_type != 'table'",
        metadata_table
    )
}

/// Turns raw metadata rows into edges. A row with a NULL name on either side
/// cannot be ordered or dropped, so it is logged and skipped.
pub fn edges_from_rows<I>(rows: I) -> Vec<DependencyEdge>
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    rows.into_iter()
        .filter_map(|row| match row {
            (Some(dependent), Some(dependency)) => Some(DependencyEdge::new(dependent, dependency)),
            (dependent, dependency) => {
                warn!(?dependent, ?dependency, "Skipping metadata row with a NULL name");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_with_null_names_are_skipped() {
        let edges = edges_from_rows(vec![
            (Some("b".to_string()), Some("a".to_string())),
            (None, Some("a".to_string())),
            (Some("c".to_string()), None),
            (Some("c".to_string()), Some("b".to_string())),
        ]);

        assert_eq!(
            edges,
            vec![DependencyEdge::new("b", "a"), DependencyEdge::new("c", "b")]
        );
    }

    #[test]
    fn test_dependency_query_filters_on_types() {
        let query = dependency_query("meta.deps");
        assert!(query.contains("FROM meta.deps"));
        assert!(query.contains("object_type = 'view'"));
        assert!(query.contains("depends_on_type != 'table'"));
    }
}
