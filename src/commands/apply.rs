//! Apply a set of edits and submit them to a file-backed store.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::plan;
use super::view::PlanReport;
use crate::output::{self, OutputFormat};
use vaultshare_core::config::AppConfig;
use vaultshare_core::result::AppResult;
use vaultshare_share::{JsonFileStore, SaveSummary};

/// Arguments for the apply command
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Batch file with the objects and their permissions
    #[arg(short, long)]
    pub batch: PathBuf,
    /// Edits file
    #[arg(short, long)]
    pub edits: PathBuf,
    /// Where to write the submitted changes
    #[arg(short, long)]
    pub out: PathBuf,
    /// Dry-run the changes before committing them
    #[arg(long)]
    pub simulate: bool,
}

/// JSON output of a successful apply
#[derive(Debug, Serialize)]
struct ApplyReport {
    #[serde(flatten)]
    plan: PlanReport,
    saved: SaveSummary,
}

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let mut config = config.clone();
    config.share.simulate_before_save |= args.simulate;

    let mut session = plan::prepare(&args.batch, &args.edits, &config).await?;
    let report = PlanReport::from_engine(session.engine());
    if format == OutputFormat::Table {
        report.print(format);
    }

    let store = JsonFileStore::new(&args.out);
    let saved = session.save(&store).await?;

    match format {
        OutputFormat::Json => output::print_json(&ApplyReport { plan: report, saved }),
        OutputFormat::Table => output::print_success(&format!(
            "Saved {} resource and {} folder changes to {}",
            saved.resources,
            saved.folders,
            args.out.display()
        )),
    }
    Ok(())
}
