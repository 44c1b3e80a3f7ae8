//! Sym file downloader
//!
//! Only the sizes are kept, never the file contents. The client does not
//! decompress transparently, so the transmitted size stays visible in the
//! `Content-Length` header and gzip-encoded bodies are inflated here.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH};
use reqwest::{StatusCode, Url};
use std::io;
use tracing::{debug, warn};

use super::http::SymbolsHttpClient;
use super::{FetcherError, FetcherResult, FileSizes, SymFileFetcher};

/// Downloads sym files and measures them
#[derive(Debug, Clone)]
pub struct SymFileDownloader {
    http_client: SymbolsHttpClient,
}

impl SymFileDownloader {
    /// Create a downloader on top of a shared HTTP client
    pub fn new(http_client: SymbolsHttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl SymFileFetcher for SymFileDownloader {
    async fn fetch_sizes(&self, url: &Url) -> FetcherResult<Option<FileSizes>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let response = self.http_client.get_raw(url, headers).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Response: {}", status.as_u16());
            return Ok(None);
        }

        let content_length = parse_content_length(response.headers());
        let gzipped = is_gzip_encoded(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|e| FetcherError::NetworkError(format!("Failed to read body of {url}: {e}")))?;

        let compressed = content_length.unwrap_or(body.len() as u64);
        let decompressed = if gzipped {
            gunzip_len(&body).map_err(|e| {
                FetcherError::DecodeError(format!("Failed to gunzip body of {url}: {e}"))
            })?
        } else {
            body.len() as u64
        };

        debug!(
            url = %url,
            compressed,
            decompressed,
            "Measured sym file"
        );

        Ok(Some(FileSizes {
            compressed,
            decompressed,
        }))
    }
}

/// Read the `Content-Length` header, if present and numeric
pub fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    let raw = headers.get(CONTENT_LENGTH)?.to_str().ok()?;
    match raw.trim().parse::<u64>() {
        Ok(length) => Some(length),
        Err(e) => {
            warn!("Failed to parse Content-Length '{}': {}", raw, e);
            None
        }
    }
}

/// Whether the response body is gzip transfer-encoded
pub fn is_gzip_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("gzip"))
        .unwrap_or(false)
}

/// Inflate a gzip body and return the decoded length without keeping it
pub fn gunzip_len(body: &[u8]) -> io::Result<u64> {
    let mut decoder = GzDecoder::new(body);
    io::copy(&mut decoder, &mut io::sink())
}
