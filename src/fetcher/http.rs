//! Symbol server HTTP client helper
//!
//! Wraps a shared [`reqwest::Client`] and attaches the `auth-token` header to
//! every request. There is no retry: every failure is either surfaced to the
//! caller or reported as a non-success response.

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::fetcher::{FetcherError, FetcherResult};

/// Header carrying the API token
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// HTTP client for the symbol server
#[derive(Clone)]
pub struct SymbolsHttpClient {
    client: Arc<Client>,
    auth_token: String,
}

impl fmt::Debug for SymbolsHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolsHttpClient")
            .field("auth_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SymbolsHttpClient {
    /// Create new HTTP client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client carrying timeout and user agent
    /// * `auth_token` - Token sent in the `auth-token` header
    pub fn new(client: Arc<Client>, auth_token: impl Into<String>) -> Self {
        Self {
            client,
            auth_token: auth_token.into(),
        }
    }

    /// Execute a GET request and deserialize a JSON body
    ///
    /// # Errors
    /// Returns `HttpStatus` on non-2xx responses, `NetworkError` on transport
    /// failures and `ParseError` when the body does not match `T`
    pub async fn get_json<T>(&self, url: &Url, params: &[(&str, String)]) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("Making GET request to: {} with {} params", url, params.len());

        let response = self
            .client
            .get(url.clone())
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
            .query(params)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetcherError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetcherError::ParseError(format!("Failed to deserialize response: {e}")))
    }

    /// Execute a GET request with extra headers and return the raw response
    ///
    /// The status is not checked; callers decide what a failure means.
    pub async fn get_raw(&self, url: &Url, headers: HeaderMap) -> FetcherResult<Response> {
        debug!("Making GET request to: {}", url);

        self.client
            .get(url.clone())
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
            .headers(headers)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))
    }
}
