//! Dry-run of a set of edits.

use std::path::{Path, PathBuf};

use clap::Args;

use super::batch::{self, BatchFile};
use super::view::PlanReport;
use crate::output::OutputFormat;
use vaultshare_core::config::AppConfig;
use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_share::ShareSession;

/// Arguments for the plan command
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Batch file with the objects and their permissions
    #[arg(short, long)]
    pub batch: PathBuf,
    /// Edits file
    #[arg(short, long)]
    pub edits: PathBuf,
}

/// Load a batch, replay edits on a fresh session.
pub async fn prepare(
    batch_path: &Path,
    edits_path: &Path,
    config: &AppConfig,
) -> AppResult<ShareSession> {
    let batch = BatchFile::load(batch_path).await?;
    let edits = batch::load_edits(edits_path).await?;
    let mut session = ShareSession::new(batch.acos.clone(), config)?;
    batch::apply_edits(&mut session, &batch, &edits)?;
    Ok(session)
}

/// Execute the plan command
pub async fn execute(args: &PlanArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let session = prepare(&args.batch, &args.edits, config).await?;
    let report = PlanReport::from_engine(session.engine());
    report.print(format);

    if report.ownerless.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Every shared item needs at least one owner: {}",
            report.ownerless.join(", ")
        )))
    }
}
