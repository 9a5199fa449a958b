//! CLI command definitions and dispatch.

pub mod aggregate;
pub mod apply;
pub mod batch;
pub mod plan;
pub mod search;
pub mod view;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use vaultshare_core::config::AppConfig;
use vaultshare_core::result::AppResult;

/// VaultShare: bulk sharing for resources and folders
#[derive(Debug, Parser)]
#[command(name = "vaultshare", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show who has access to a batch of objects
    Aggregate(aggregate::AggregateArgs),
    /// Apply edits in memory and show the resulting changes
    Plan(plan::PlanArgs),
    /// Apply edits and write the resulting changes
    Apply(apply::ApplyArgs),
    /// Search users and groups that can be added to the share
    Search(search::SearchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Aggregate(args) => aggregate::execute(args, self.format).await,
            Commands::Plan(args) => plan::execute(args, config, self.format).await,
            Commands::Apply(args) => apply::execute(args, config, self.format).await,
            Commands::Search(args) => search::execute(args, config, self.format).await,
        }
    }
}
