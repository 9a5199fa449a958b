//! Aggregated access view of a batch.

use std::path::PathBuf;

use clap::Args;

use super::batch::BatchFile;
use super::view::GrantRow;
use crate::output::{self, OutputFormat};
use vaultshare_core::result::AppResult;
use vaultshare_share::ShareEngine;

/// Arguments for the aggregate command
#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Batch file with the objects and their permissions
    #[arg(short, long)]
    pub batch: PathBuf,
}

/// Execute the aggregate command
pub async fn execute(args: &AggregateArgs, format: OutputFormat) -> AppResult<()> {
    let batch = BatchFile::load(&args.batch).await?;
    let engine = ShareEngine::new(batch.acos)?;
    let rows: Vec<GrantRow> = engine
        .initial_grants()
        .iter()
        .map(GrantRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
