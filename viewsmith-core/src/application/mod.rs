// viewsmith-core/src/application/mod.rs

pub mod engine;
pub mod plan;
pub mod recreate;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement `use viewsmith_core::application::{run_recreation, plan_recreation};`

pub use engine::execute_statement;
pub use plan::plan_recreation;
pub use recreate::{RecreateOptions, drop_pass, recreate_pass, run_recreation};
pub use report::{RecreationReport, ViewOutcome, ViewStatus};
