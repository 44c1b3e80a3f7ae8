//! Sym sizes workflow orchestration
//!
//! The executor drives one run end to end:
//!
//! 1. **Resume**: load the [`crate::resume::ResumeLedger`] from the output path
//! 2. **Query**: pull file records from a [`crate::fetcher::SymbolCatalog`]
//! 3. **Filter**: ignore non-`.sym` keys and normalize storage prefixes
//! 4. **Measure**: download new files with a [`crate::fetcher::SymFileFetcher`]
//! 5. **Record**: append one CSV row per measured file, immediately
//!
//! # Error Handling
//!
//! Everything is sequential and nothing is retried. Catalog failures,
//! transport failures and malformed keys abort the run; a download answered
//! with a non-success status is logged and skipped. Rows written before an
//! abort stay on disk, and the next run skips them.

use std::path::PathBuf;

pub mod executor;
pub mod key;

pub use executor::SizesExecutor;
pub use key::{normalize_key, resume_key_from};

use crate::config::ConfigError;
use crate::fetcher::FetcherError;
use crate::output::OutputError;
use crate::resume::ResumeError;

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Catalog or transport failure
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Output file failure
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),

    /// Previous output could not be read
    #[error("resume error: {0}")]
    ResumeError(#[from] ResumeError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Key has fewer than three path components after normalization
    #[error("malformed key '{0}': expected MODULE/DEBUG_ID/DEBUG_FILENAME")]
    MalformedKey(String),
}

/// Result type for download operations
pub type DownloadResult<T> = Result<T, DownloadError>;

/// One run's parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizesJob {
    /// Module name substring to search for
    pub module: String,
    /// Processing limit; the run stops once more than this many entries
    /// were processed, so up to `limit + 1` entries are processed
    pub limit: u64,
    /// CSV output path
    pub output: PathBuf,
}

impl SizesJob {
    /// Create a job
    pub fn new(module: impl Into<String>, limit: u64, output: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            limit,
            output: output.into(),
        }
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries counted against the limit (downloaded + already present)
    pub processed: u64,
    /// Files downloaded and written
    pub downloaded: u64,
    /// Files skipped because an earlier run recorded them
    pub already_present: u64,
    /// Downloads answered with a non-success status
    pub failed_downloads: u64,
    /// Catalog records that are not `.sym` files
    pub ignored_non_sym: u64,
    /// Records whose key holds characters the resume scan cannot read back
    pub unrecordable_keys: u64,
}
