//! Registry search and version resolution for Gradle version catalogs.
//!
//! Given a free-text keyword, [`CatalogSearcher`] probes well-known
//! coordinate patterns on maven.google.com, runs broad queries against the
//! Maven Central index, deduplicates and scores what comes back, and streams
//! hits grouped by vendor. [`VersionResolver`] lists the published versions
//! of a known coordinate, newest first, behind a five-minute cache.
//!
//! Registry failures never surface as errors: a backend that is down or
//! returns garbage contributes nothing, and the remaining phases still run.

pub mod error;
pub mod patterns;
pub mod registry;
pub mod score;
pub mod search;
pub mod types;
pub mod version;
pub mod versions;

pub use error::{RegistryError, Result};
pub use patterns::PatternBook;
pub use registry::{GoogleMavenClient, MavenCentralClient};
pub use score::{ScoredRecord, rank, score};
pub use search::{CatalogSearcher, SearchConfig, SearchStream};
pub use types::{Coordinate, LibraryRecord, SearchHit, Vendor};
pub use version::{compare_versions, is_prerelease};
pub use versions::{Backend, BackendRouting, VersionResolver};
