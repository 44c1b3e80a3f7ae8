//! Catalog queries and sym file downloads

use crate::FileRecord;
use async_trait::async_trait;
use futures_util::Stream;
use reqwest::Url;
use std::pin::Pin;

pub mod catalog;
pub mod download;
pub mod http;

pub use catalog::UploadsCatalog;
pub use download::SymFileDownloader;
pub use http::SymbolsHttpClient;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Server answered with a non-success status
    #[error("HTTP error: {status} for {url}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response parse error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Network error (connect, timeout, body read)
    #[error("network error: {0}")]
    NetworkError(String),

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Invalid request URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Stream of file records from the catalog
pub type FileRecordStream = Pin<Box<dyn Stream<Item = FetcherResult<FileRecord>> + Send>>;

/// Sizes observed for one downloaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizes {
    /// Size as transmitted
    pub compressed: u64,
    /// Size after transfer decoding
    pub decompressed: u64,
}

/// Source of file records matching a module name
pub trait SymbolCatalog: Send + Sync {
    /// Search for files whose key contains `module` (case-sensitive)
    ///
    /// The stream is lazy: each page is requested only once the previous one
    /// has been consumed, and the stream ends at the first empty page.
    fn search(&self, module: &str) -> FileRecordStream;
}

/// Downloader reporting the sizes of a single file
#[async_trait]
pub trait SymFileFetcher: Send + Sync {
    /// Download `url` and report its sizes
    ///
    /// Returns `Ok(None)` when the server answers with a non-success status;
    /// that is a per-file failure the caller may skip past.
    async fn fetch_sizes(&self, url: &Url) -> FetcherResult<Option<FileSizes>>;
}
