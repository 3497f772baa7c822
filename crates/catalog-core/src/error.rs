//! Transport-level errors.

use thiserror::Error;

/// Failure of a single HTTP request.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The request never produced a response: DNS, connect, TLS, or timeout.
    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl HttpError {
    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = HttpError::Status {
            url: "https://search.maven.org/solrsearch/select".to_string(),
            status: 503,
        };

        assert_eq!(
            err.to_string(),
            "request to 'https://search.maven.org/solrsearch/select' returned HTTP 503"
        );
    }

    #[test]
    fn test_url_accessor() {
        let err = HttpError::Status {
            url: "https://maven.google.com".to_string(),
            status: 404,
        };

        assert_eq!(err.url(), "https://maven.google.com");
    }
}
