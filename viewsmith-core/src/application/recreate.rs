// viewsmith-core/src/application/recreate.rs

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::application::engine::execute_statement;
use crate::application::plan::plan_recreation;
use crate::application::report::{RecreationReport, ViewOutcome, ViewStatus};
use crate::domain::graph::ViewOrdering;
use crate::domain::identifier::ViewName;
use crate::domain::ports::ScriptSource;
use crate::error::ViewsmithError;
use crate::ports::connector::Connector;

#[derive(Debug, Clone, Copy, Default)]
pub struct RecreateOptions {
    /// Print the statements instead of running them.
    pub dry_run: bool,
}

/// Full run: read the dependency metadata, then drop and recreate every
/// orderable view.
///
/// Only the metadata query can fail the run. Per-view failures are rolled
/// back, logged and recorded in the report.
#[instrument(skip(connector, scripts), fields(engine = connector.engine_name()))]
pub async fn run_recreation<S>(
    connector: &dyn Connector,
    scripts: &S,
    metadata_table: &str,
    options: RecreateOptions,
) -> Result<RecreationReport, ViewsmithError>
where
    S: ScriptSource,
{
    let started_at = Utc::now();

    println!("🧠 Calculating view order...");
    let ordering = plan_recreation(connector, metadata_table).await?;
    println!("   ordered_views: [{}]", ordering.ordered.join(", "));

    let dropped = drop_pass(connector, &ordering, options).await;
    let recreated = recreate_pass(connector, scripts, &ordering, options).await;

    Ok(RecreationReport {
        engine: connector.engine_name().to_string(),
        dry_run: options.dry_run,
        started_at,
        finished_at: Utc::now(),
        ordering,
        dropped,
        recreated,
    })
}

/// Drops views in reverse order, one transaction per view.
pub async fn drop_pass(
    connector: &dyn Connector,
    ordering: &ViewOrdering,
    options: RecreateOptions,
) -> Vec<ViewOutcome> {
    let mut outcomes = Vec::with_capacity(ordering.ordered.len());

    for view in ordering.drop_order() {
        println!("🗑️  Dropping view: {}", view);

        let status = match drop_view(connector, view, options).await {
            Ok(status) => status,
            Err(e) => {
                eprintln!("   ❌ Failed to drop {}: {}", view, e);
                error!(view = %view, error = %e, "Drop failed");
                rollback(connector, view).await;
                ViewStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(ViewOutcome::new(view, status));
    }

    outcomes
}

/// Recreates views in dependency order, one transaction per view. A failure
/// does not stop later views, even those depending on the failed one.
pub async fn recreate_pass<S>(
    connector: &dyn Connector,
    scripts: &S,
    ordering: &ViewOrdering,
    options: RecreateOptions,
) -> Vec<ViewOutcome>
where
    S: ScriptSource,
{
    let mut outcomes = Vec::with_capacity(ordering.ordered.len());

    for view in &ordering.ordered {
        println!("🏗️  Recreating view: {}", view);

        let status = match recreate_view(connector, scripts, view, options).await {
            Ok(status) => status,
            Err(e) => {
                eprintln!("   ❌ Failed to recreate {}: {}", view, e);
                error!(view = %view, error = %e, "Recreate failed");
                rollback(connector, view).await;
                ViewStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(ViewOutcome::new(view, status));
    }

    outcomes
}

async fn drop_view(
    connector: &dyn Connector,
    view: &str,
    options: RecreateOptions,
) -> Result<ViewStatus, ViewsmithError> {
    let name = ViewName::parse(view)?;
    let statement = name.drop_statement();

    if options.dry_run {
        println!("   {}", statement);
        return Ok(ViewStatus::Planned);
    }

    execute_statement(connector, &statement).await?;
    connector.commit().await?;
    Ok(ViewStatus::Succeeded)
}

async fn recreate_view<S>(
    connector: &dyn Connector,
    scripts: &S,
    view: &str,
    options: RecreateOptions,
) -> Result<ViewStatus, ViewsmithError>
where
    S: ScriptSource,
{
    let name = ViewName::parse(view)?;
    let sql = scripts.load(&name)?;

    if options.dry_run {
        println!("   {}", sql.trim());
        return Ok(ViewStatus::Planned);
    }

    execute_statement(connector, &sql).await?;
    connector.commit().await?;
    Ok(ViewStatus::Succeeded)
}

async fn rollback(connector: &dyn Connector, view: &str) {
    if let Err(e) = connector.rollback().await {
        error!(view = %view, error = %e, "Rollback failed");
    } else {
        info!(view = %view, "Rolled back");
    }
}
