// viewsmith/src/commands/recreate.rs
//
// USE CASE: Drop and recreate every view in dependency order.

use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;
use viewsmith_core::application::{RecreateOptions, run_recreation};
use viewsmith_core::infrastructure::config::load_project_config;
use viewsmith_core::infrastructure::scripts::FsScriptLoader;

use super::session;

pub async fn execute(project_dir: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    // B. Session + script lookup
    let connector = session::open(&project_dir, &config).await?;
    println!("   Engine: {}", connector.engine_name());
    let scripts = FsScriptLoader::from_project(&project_dir, &config.script_paths);
    if dry_run {
        println!("   🧪 Dry run: no statement will be executed");
    }

    // C. Run, then always release the session
    let result = run_recreation(
        connector.as_ref(),
        &scripts,
        &config.metadata_table,
        RecreateOptions { dry_run },
    )
    .await;
    let closed = connector.close().await;

    let report = result.context("View recreation aborted")?;
    closed.context("Failed to close the database session")?;

    if !dry_run {
        let target_dir = project_dir.join(&config.target_path);
        // The report is a by-product: failing to write it must not stop the run
        match report.save(&target_dir) {
            Ok(path) => println!("📄 Report saved to {}", path.display()),
            Err(e) => {
                warn!(target = %target_dir.display(), error = %e, "Report not written");
                eprintln!("   ⚠️  Could not write the run report: {}", e);
            }
        }
    }

    if report.ordering.has_unresolved() {
        eprintln!(
            "⚠️  Skipped (circular dependencies): {}",
            report.ordering.unresolved.join(", ")
        );
    }
    println!(
        "📊 {} views: {} drop failure(s), {} recreate failure(s) in {:.2?}",
        report.ordering.ordered.len(),
        report.drop_failures(),
        report.recreate_failures(),
        start.elapsed()
    );
    println!("View recreation completed.");

    Ok(())
}
