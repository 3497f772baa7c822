//! Errors specific to registry lookups.
//!
//! These stay inside the crate: the public client methods log them and
//! collapse every failure into an empty result, so callers only ever
//! distinguish "found" from "not found".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Http(#[from] catalog_core::HttpError),

    #[error("Failed to parse search API response: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Failed to parse maven-metadata.xml: {message}")]
    Xml { message: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
