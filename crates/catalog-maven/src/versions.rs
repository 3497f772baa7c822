//! Version resolution behind a short-lived per-coordinate cache.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use catalog_core::HttpClient;

use crate::registry::{GoogleMavenClient, MavenCentralClient};
use crate::types::Coordinate;
use crate::version::{compare_versions, is_prerelease};

/// How long a fetched version list stays fresh.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// The backend a version list is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    GoogleMaven,
    MavenCentral,
}

/// Prefix table routing coordinates to their preferred backend.
///
/// Groups matching one of the configured prefixes resolve against the
/// maven.google.com metadata tree first; everything else asks the Maven
/// Central index first. The other backend is tried when the preferred one
/// comes up empty.
#[derive(Debug, Clone)]
pub struct BackendRouting {
    google_prefixes: Vec<String>,
}

impl Default for BackendRouting {
    fn default() -> Self {
        Self::new(["androidx.", "com.android.", "com.google."])
    }
}

impl BackendRouting {
    /// A table preferring the metadata backend for the given group prefixes.
    pub fn new<I, S>(google_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            google_prefixes: google_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn preferred(&self, group: &str) -> Backend {
        if self.google_prefixes.iter().any(|p| group.starts_with(p.as_str())) {
            Backend::GoogleMaven
        } else {
            Backend::MavenCentral
        }
    }

    pub const fn fallback(backend: Backend) -> Backend {
        match backend {
            Backend::GoogleMaven => Backend::MavenCentral,
            Backend::MavenCentral => Backend::GoogleMaven,
        }
    }
}

/// Cached outcome of one coordinate lookup. Empty lists are cached too, so
/// repeat lookups of an unknown coordinate stay off the network until the
/// entry expires.
#[derive(Debug, Clone)]
struct VersionList {
    versions: Vec<String>,
    fetched_at: Instant,
}

/// Fetches, orders, and caches the published versions of coordinates.
///
/// Lists come back newest first under the segment-wise comparator. The
/// cache is shared by every clone of the resolver; entries are replaced
/// whole (last writer wins) and expire after five minutes by default.
#[derive(Clone)]
pub struct VersionResolver {
    google: GoogleMavenClient,
    central: MavenCentralClient,
    routing: BackendRouting,
    ttl: Duration,
    cache: Arc<DashMap<Coordinate, VersionList>>,
}

impl VersionResolver {
    pub fn new(http: HttpClient) -> Self {
        Self::with_clients(
            GoogleMavenClient::new(http.clone()),
            MavenCentralClient::new(http),
        )
    }

    /// Builds a resolver around preconfigured clients (mirrors, tests).
    pub fn with_clients(google: GoogleMavenClient, central: MavenCentralClient) -> Self {
        Self {
            google,
            central,
            routing: BackendRouting::default(),
            ttl: DEFAULT_TTL,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Replaces the backend routing table.
    pub fn with_routing(mut self, routing: BackendRouting) -> Self {
        self.routing = routing;
        self
    }

    /// Overrides the cache freshness window. A zero TTL disables caching.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Every published version of `coordinate`, newest first. An unknown
    /// coordinate (or an unreachable pair of registries) yields an empty
    /// list.
    pub async fn fetch_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        if let Some(cached) = self.cached(coordinate) {
            return cached;
        }

        let versions = self.fetch_remote(coordinate).await;
        self.cache.insert(
            coordinate.clone(),
            VersionList {
                versions: versions.clone(),
                fetched_at: Instant::now(),
            },
        );
        versions
    }

    /// Latest non-prerelease version, or the newest overall when every
    /// published version is a pre-release.
    pub async fn latest_stable(&self, coordinate: &Coordinate) -> Option<String> {
        let versions = self.fetch_versions(coordinate).await;
        versions
            .iter()
            .find(|v| !is_prerelease(v))
            .or_else(|| versions.first())
            .cloned()
    }

    fn cached(&self, coordinate: &Coordinate) -> Option<Vec<String>> {
        let entry = self.cache.get(coordinate)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| entry.versions.clone())
    }

    async fn fetch_remote(&self, coordinate: &Coordinate) -> Vec<String> {
        let preferred = self.routing.preferred(&coordinate.group);

        let mut versions = self.fetch_from(preferred, coordinate).await;
        if versions.is_empty() {
            let fallback = BackendRouting::fallback(preferred);
            tracing::debug!(%coordinate, ?preferred, ?fallback, "preferred backend empty");
            versions = self.fetch_from(fallback, coordinate).await;
        }

        order_versions(versions)
    }

    async fn fetch_from(&self, backend: Backend, coordinate: &Coordinate) -> Vec<String> {
        match backend {
            Backend::GoogleMaven => self.google.all_versions(coordinate).await,
            Backend::MavenCentral => self.central.versions(coordinate).await,
        }
    }
}

/// Drops exact duplicates (first occurrence wins) and sorts what remains
/// descending. Distinct spellings that compare equal, like `1.0` and
/// `1.0.0`, both survive.
fn order_versions(versions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = versions
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect();

    unique.sort_by(|a, b| compare_versions(b, a));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing_prefers_google_for_android_groups() {
        let routing = BackendRouting::default();
        assert_eq!(routing.preferred("androidx.room"), Backend::GoogleMaven);
        assert_eq!(routing.preferred("com.android.tools"), Backend::GoogleMaven);
        assert_eq!(routing.preferred("com.google.dagger"), Backend::GoogleMaven);
        assert_eq!(routing.preferred("org.apache.commons"), Backend::MavenCentral);
        assert_eq!(routing.preferred("io.ktor"), Backend::MavenCentral);
    }

    #[test]
    fn test_fallback_is_the_other_backend() {
        assert_eq!(
            BackendRouting::fallback(Backend::GoogleMaven),
            Backend::MavenCentral
        );
        assert_eq!(
            BackendRouting::fallback(Backend::MavenCentral),
            Backend::GoogleMaven
        );
    }

    #[test]
    fn test_custom_routing_prefixes() {
        let routing = BackendRouting::new(["org.custom."]);
        assert_eq!(routing.preferred("org.custom.lib"), Backend::GoogleMaven);
        assert_eq!(routing.preferred("androidx.room"), Backend::MavenCentral);
    }

    #[test]
    fn test_order_versions_newest_first() {
        let versions = vec![
            "1.9.0".to_string(),
            "2.0.0".to_string(),
            "1.9.0-beta01".to_string(),
            "1.10.0".to_string(),
        ];

        assert_eq!(
            order_versions(versions),
            vec!["2.0.0", "1.10.0", "1.9.0", "1.9.0-beta01"]
        );
    }

    #[test]
    fn test_order_versions_drops_exact_duplicates_only() {
        let versions = vec![
            "1.0.0".to_string(),
            "1.0".to_string(),
            "1.0.0".to_string(),
        ];

        // "1.0" and "1.0.0" compare equal but are distinct spellings.
        assert_eq!(order_versions(versions), vec!["1.0.0", "1.0"]);
    }
}
