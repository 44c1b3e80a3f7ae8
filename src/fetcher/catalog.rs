//! Uploads catalog client
//!
//! Pages through the uploaded files search endpoint and yields the records
//! that belong to the requested module. Pages are numbered from 1 and
//! requested one at a time as the consumer pulls records; the stream ends on
//! the first page with no files, or right after yielding an error.

use futures_util::{stream, StreamExt};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use super::http::SymbolsHttpClient;
use super::{FetcherError, FetcherResult, FileRecordStream, SymbolCatalog};
use crate::config::{CreatedWindow, SymbolsConfig};
use crate::FileRecord;

/// One page of the files search response
#[derive(Debug, Deserialize)]
pub struct FilesPage {
    /// Files on this page
    pub files: Vec<UploadedFile>,
}

/// A file entry as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    /// Storage key
    pub key: String,
    /// Stored size in bytes
    pub size: u64,
    /// Creation timestamp
    pub created_at: String,
    /// Upload the file belongs to
    pub upload: UploadInfo,
}

/// Upload metadata attached to a file entry
#[derive(Debug, Clone, Deserialize)]
pub struct UploadInfo {
    /// Whether the upload came from a try build
    pub try_symbols: bool,
}

impl UploadedFile {
    /// Whether this file should be yielded for `module`
    ///
    /// Try uploads are dropped, as are keys that do not contain `module`
    /// (case-sensitive substring match).
    pub fn matches(&self, module: &str) -> bool {
        !self.upload.try_symbols && self.key.contains(module)
    }
}

impl From<UploadedFile> for FileRecord {
    fn from(file: UploadedFile) -> Self {
        Self {
            key: file.key,
            size: file.size,
            created_at: file.created_at,
        }
    }
}

/// Build the query parameters for one page
pub fn page_params(module: &str, window: &CreatedWindow, page: u32) -> Vec<(&'static str, String)> {
    let [after, before] = window.query_bounds();
    vec![
        ("page", page.to_string()),
        ("key", module.to_string()),
        ("created_at", after),
        ("created_at", before),
    ]
}

/// Catalog client for the uploaded files search endpoint
#[derive(Debug, Clone)]
pub struct UploadsCatalog {
    http_client: SymbolsHttpClient,
    files_url: Url,
    window: CreatedWindow,
}

impl UploadsCatalog {
    /// Create a catalog client from configuration
    pub fn new(http_client: SymbolsHttpClient, config: &SymbolsConfig) -> FetcherResult<Self> {
        let files_url = config
            .files_url()
            .map_err(|e| FetcherError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http_client,
            files_url,
            window: config.created_window(),
        })
    }

    /// Fetch one raw page of results, before filtering
    pub async fn fetch_page(&self, module: &str, page: u32) -> FetcherResult<Vec<UploadedFile>> {
        info!("page {}", page);

        let params = page_params(module, &self.window, page);
        let body: FilesPage = self.http_client.get_json(&self.files_url, &params).await?;

        debug!("Received {} files in page {}", body.files.len(), page);
        Ok(body.files)
    }
}

impl SymbolCatalog for UploadsCatalog {
    fn search(&self, module: &str) -> FileRecordStream {
        let catalog = self.clone();
        let module = module.to_string();

        let stream = stream::unfold((1u32, false), move |(page, done)| {
            let catalog = catalog.clone();
            let module = module.clone();

            async move {
                if done {
                    return None;
                }

                match catalog.fetch_page(&module, page).await {
                    Ok(files) => {
                        if files.is_empty() {
                            debug!("Empty page {} received, catalog exhausted", page);
                            return None;
                        }

                        let items: Vec<FetcherResult<FileRecord>> = files
                            .into_iter()
                            .filter(|file| file.matches(&module))
                            .map(|file| Ok(FileRecord::from(file)))
                            .collect();
                        Some((stream::iter(items), (page + 1, false)))
                    }
                    Err(e) => Some((stream::iter(vec![Err(e)]), (page, true))),
                }
            }
        })
        .flatten();

        Box::pin(stream)
    }
}
