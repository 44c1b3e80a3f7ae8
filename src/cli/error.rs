//! CLI error types and conversions

use crate::config::ConfigError;
use crate::downloader::DownloadError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Invalid configuration argument
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Run failure
    #[error("download error: {0}")]
    DownloadError(#[from] DownloadError),
}
