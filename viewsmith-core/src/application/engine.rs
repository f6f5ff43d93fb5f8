// viewsmith-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::ViewsmithError;
use crate::ports::connector::Connector;

/// Runs one statement through the connector with timing logs.
/// Transaction control (commit/rollback) stays with the caller.
#[instrument(skip(connector, sql), fields(engine = connector.engine_name(), sql.len = sql.len()))]
pub async fn execute_statement(connector: &dyn Connector, sql: &str) -> Result<(), ViewsmithError> {
    let start = Instant::now();
    debug!("⚡ Executing: {}", sql);

    let result = connector.execute(sql).await;
    let duration = start.elapsed();

    match &result {
        Ok(_) => debug!("✅ Statement finished in {:.2?}", duration),
        Err(e) => error!("❌ Statement failed after {:.2?}: {}", duration, e),
    }

    result
}
