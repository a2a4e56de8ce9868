//! HTTP fetch primitive shared by both pollers.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument};

/// Why a request produced no response.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// No complete response within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused, DNS failure, reset, ...
    #[error("Transport error: {0}")]
    Transport(String),

    /// The underlying client could not be constructed.
    #[error("HTTP client error: {0}")]
    ClientBuild(String),
}

impl FetchError {
    fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// A `reqwest` client with an explicit per-request deadline.
///
/// Every request (connect, headers and body) is bounded by `timeout`, so a
/// cycle that uses this fetcher always finishes.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    /// Issues a GET with no body and returns the response head.
    ///
    /// Any status is `Ok`; only the absence of a response is an error.
    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        match tokio::time::timeout(self.timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => {
                debug!(status = response.status().as_u16(), "Response received");
                Ok(response)
            }
            Ok(Err(e)) => Err(FetchError::from_reqwest(e, self.timeout)),
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }

    /// Issues a GET and reads the full body.
    ///
    /// Returns the status alongside the body so the caller decides what a
    /// non-success status means.
    pub async fn get_body(&self, url: &str) -> Result<(reqwest::StatusCode, Vec<u8>), FetchError> {
        let response = self.get(url).await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;
        Ok((status, body.to_vec()))
    }
}
