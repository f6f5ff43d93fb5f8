// viewsmith/src/commands/plan.rs
//
// USE CASE: Show the drop/recreate order computed from the metadata table.

use std::path::PathBuf;

use viewsmith_core::application::plan_recreation;
use viewsmith_core::infrastructure::config::load_project_config;

use super::session;
use crate::cli::OutputFormat;

pub async fn execute(project_dir: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir)?;
    let connector = session::open(&project_dir, &config).await?;

    let result = plan_recreation(connector.as_ref(), &config.metadata_table).await;
    connector.close().await?;
    let ordering = result?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ordering)?);
        }
        OutputFormat::Text => {
            println!("\n🏗️  Recreate order:");
            for (i, view) in ordering.ordered.iter().enumerate() {
                println!("   {:>3}. {}", i + 1, view);
            }
            println!("\n🗑️  Drop order:");
            for (i, view) in ordering.drop_order().enumerate() {
                println!("   {:>3}. {}", i + 1, view);
            }
            if ordering.has_unresolved() {
                eprintln!("\n⚠️  Unresolved (circular dependencies):");
                for view in &ordering.unresolved {
                    eprintln!("   ❌ {}", view);
                }
            }
        }
    }

    Ok(())
}
