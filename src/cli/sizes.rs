//! Sym sizes command

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use super::CliError;
use crate::config::{
    CreatedWindow, SymbolsConfig, DEFAULT_CREATED_AFTER, DEFAULT_CREATED_BEFORE, SYMBOLS_URL,
};
use crate::downloader::{RunSummary, SizesExecutor, SizesJob};

/// Downloads sym files with a given module name and captures their sizes in a CSV file.
///
/// Requires an auth token for the symbol server that is allowed to view uploaded files.
#[derive(Parser, Debug)]
#[command(name = "sym-sizes")]
#[command(version)]
pub struct Cli {
    /// Auth token for the symbol server
    #[arg(long)]
    pub auth_token: String,

    /// Number of files to download
    #[arg(long, default_value_t = 10)]
    pub num: u64,

    /// Symbol server base URL
    #[arg(long, default_value = SYMBOLS_URL)]
    pub symbols_url: String,

    /// Only consider uploads created on or after this date (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_CREATED_AFTER)]
    pub created_after: String,

    /// Only consider uploads created before this date (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_CREATED_BEFORE)]
    pub created_before: String,

    /// Module name to search for (case-sensitive substring)
    pub modulename: String,

    /// CSV file to write; rows are appended if it already exists
    pub outputfile: PathBuf,
}

impl Cli {
    /// Build the symbol server configuration from the arguments
    pub fn config(&self) -> Result<SymbolsConfig, CliError> {
        let window = CreatedWindow::parse(&self.created_after, &self.created_before)?;
        Ok(SymbolsConfig::new(&self.symbols_url)?.with_created_window(window))
    }

    /// Build the job described by the arguments
    pub fn job(&self) -> SizesJob {
        SizesJob::new(self.modulename.clone(), self.num, self.outputfile.clone())
    }

    /// Run the command
    pub async fn execute(&self) -> Result<RunSummary, CliError> {
        let config = self.config()?;
        let executor = SizesExecutor::from_config(&config, &self.auth_token)?;

        let summary = executor.execute(&self.job()).await?;

        info!(
            processed = summary.processed,
            downloaded = summary.downloaded,
            already_present = summary.already_present,
            failed_downloads = summary.failed_downloads,
            ignored_non_sym = summary.ignored_non_sym,
            unrecordable_keys = summary.unrecordable_keys,
            "Run complete: {}",
            self.outputfile.display()
        );
        Ok(summary)
    }
}
