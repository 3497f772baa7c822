//! Shared HTTP transport for the catalog-search workspace.
//!
//! Registry clients in the other crates build their URLs and parse their
//! payloads themselves; this crate only owns how bytes move: one pooled
//! client, bounded timeouts, and a small error taxonomy separating transport
//! failures from non-success statuses.

pub mod error;
pub mod http;

pub use error::{HttpError, Result};
pub use http::HttpClient;
