//! Bing dictionary web service client
//!
//! Fetches the raw JSON document for a word. The body is returned untouched so
//! it can be cached byte-for-byte; parsing happens later in the pipeline.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::info;

/// Base URL of the dictionary service
pub const DEFAULT_ENDPOINT: &str = "http://xtk.azurewebsites.net/BingDictService.aspx";

/// Query parameter carrying the word
const WORD_PARAM: &str = "Word";

/// Errors that can occur when fetching a definition
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// HTTP request failed, timed out, or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Source of raw dictionary responses
pub trait Dictionary {
    /// Fetches the raw response body for `word`
    fn fetch(&self, word: &str) -> impl Future<Output = Result<Vec<u8>, DictionaryError>> + Send;
}

/// Client for the remote dictionary service
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: Client,
    endpoint: String,
}

impl DictionaryClient {
    /// Create a client for `endpoint`, optionally bounding each request by `timeout`
    ///
    /// Without a timeout the transport default applies, which may wait indefinitely.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DictionaryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().map_err(DictionaryError::Client)?,
            endpoint: endpoint.into(),
        })
    }
}

impl Dictionary for DictionaryClient {
    async fn fetch(&self, word: &str) -> Result<Vec<u8>, DictionaryError> {
        info!(word, endpoint = %self.endpoint, "fetching definition");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(WORD_PARAM, word)])
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;

        Ok(body.to_vec())
    }
}
