// viewsmith-core/src/application/plan.rs

use tracing::{info, instrument, warn};

use crate::domain::graph::{DependencyGraph, GraphSolver, ViewOrdering};
use crate::domain::identifier::ViewName;
use crate::error::ViewsmithError;
use crate::ports::connector::Connector;

/// Reads the dependency metadata and orders every view it mentions.
///
/// Views caught in a cycle are not an error: they end up in
/// `ViewOrdering::unresolved` and are left alone by the recreation passes.
#[instrument(skip(connector), fields(engine = connector.engine_name()))]
pub async fn plan_recreation(
    connector: &dyn Connector,
    metadata_table: &str,
) -> Result<ViewOrdering, ViewsmithError> {
    let table = ViewName::parse(metadata_table)?;
    let edges = connector.fetch_dependencies(table.as_str()).await?;

    let graph = DependencyGraph::build(&edges);
    let ordering = GraphSolver::order(&graph);
    info!(
        edges = edges.len(),
        views = graph.len(),
        ordered = ordering.ordered.len(),
        "Dependency graph resolved"
    );

    if ordering.has_unresolved() {
        warn!(
            unresolved = ?ordering.unresolved,
            "Circular dependencies: these views will be neither dropped nor recreated"
        );
    }

    Ok(ordering)
}
