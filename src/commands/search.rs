//! Grantee search against a batch's directory.

use std::path::PathBuf;

use clap::Args;

use super::batch::BatchFile;
use super::view::GranteeRow;
use crate::output::{self, OutputFormat};
use vaultshare_core::config::AppConfig;
use vaultshare_core::result::AppResult;
use vaultshare_share::{ShareSession, StaticDirectory};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Batch file with the objects and the searchable directory
    #[arg(short, long)]
    pub batch: PathBuf,
    /// Free-text keywords
    pub keywords: String,
}

/// Execute the search command
pub async fn execute(args: &SearchArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let batch = BatchFile::load(&args.batch).await?;
    let directory = StaticDirectory::new(batch.directory.clone());
    let session = ShareSession::new(batch.acos, config)?;

    let found = session.search_grantees(&directory, &args.keywords).await?;
    let rows: Vec<GranteeRow> = found.iter().map(GranteeRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
