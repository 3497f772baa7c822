//! Thin reqwest wrapper with bounded timeouts.
//!
//! Every registry request in the workspace goes through [`HttpClient`]. The
//! client bounds connect and total request time at ten seconds each and does
//! no caching of its own; response memoization is the caller's concern.

use bytes::Bytes;
use std::time::Duration;

use crate::error::{HttpError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("catalog-search/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client. Cheap to clone; clones reuse one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client construction failed: no TLS backend available");

        Self { client }
    }

    /// Performs one GET and returns the body of a 2xx response.
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HttpError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|source| HttpError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
