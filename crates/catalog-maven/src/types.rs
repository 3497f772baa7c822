//! Domain types for registry search results.

use std::fmt;

use serde::Deserialize;

/// Group/artifact pair identifying a library independent of version.
///
/// Equality and hashing make this the deduplication key everywhere: a
/// coordinate is emitted at most once per search regardless of how many
/// backends or phases produce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parses a `"group:artifact"` pair. Anything after a second colon stays
    /// in the artifact; missing or empty halves yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, artifact) = s.split_once(':')?;
        if group.is_empty() || artifact.is_empty() {
            return None;
        }
        Some(Self::new(group, artifact))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// One library as reported by a backend: its coordinate and the latest
/// version that backend knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRecord {
    pub coordinate: Coordinate,
    pub latest_version: String,
}

pub(crate) const ANDROIDX_PREFIXES: &[&str] = &["androidx."];
pub(crate) const GOOGLE_PREFIXES: &[&str] = &["com.google.", "com.android.", "android.arch."];
pub(crate) const JETBRAINS_PREFIXES: &[&str] = &["org.jetbrains."];

/// Publisher bucket derived from the group prefix.
///
/// Used for phase ordering and section grouping only; records never store
/// it, so reclassification is free when the prefix tables change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    AndroidX,
    Google,
    JetBrains,
    Other,
}

impl Vendor {
    /// Classifies a group id by its prefix. The first matching bucket wins;
    /// anything unmatched is [`Vendor::Other`].
    pub fn classify(group: &str) -> Self {
        if ANDROIDX_PREFIXES.iter().any(|p| group.starts_with(p)) {
            Self::AndroidX
        } else if GOOGLE_PREFIXES.iter().any(|p| group.starts_with(p)) {
            Self::Google
        } else if JETBRAINS_PREFIXES.iter().any(|p| group.starts_with(p)) {
            Self::JetBrains
        } else {
            Self::Other
        }
    }

    /// Section label for rendered result lists.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AndroidX => "AndroidX",
            Self::Google => "Google",
            Self::JetBrains => "JetBrains",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every prefix the vendor tables know about, in classification order.
pub(crate) fn known_vendor_prefixes() -> impl Iterator<Item = &'static str> {
    ANDROIDX_PREFIXES
        .iter()
        .chain(GOOGLE_PREFIXES)
        .chain(JETBRAINS_PREFIXES)
        .copied()
}

/// One item yielded by a streaming search: the record plus the vendor bucket
/// of the phase that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub record: LibraryRecord,
    pub vendor: Vendor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let coord = Coordinate::new("androidx.room", "room-runtime");
        assert_eq!(coord.to_string(), "androidx.room:room-runtime");
    }

    #[test]
    fn test_coordinate_parse() {
        let coord = Coordinate::parse("androidx.room:room-ktx").unwrap();
        assert_eq!(coord.group, "androidx.room");
        assert_eq!(coord.artifact, "room-ktx");

        assert!(Coordinate::parse("no-colon").is_none());
        assert!(Coordinate::parse(":artifact").is_none());
        assert!(Coordinate::parse("group:").is_none());
    }

    #[test]
    fn test_coordinate_parse_keeps_extra_colons_in_artifact() {
        let coord = Coordinate::parse("com.google.guava:guava:31.1-jre").unwrap();
        assert_eq!(coord.group, "com.google.guava");
        assert_eq!(coord.artifact, "guava:31.1-jre");
    }

    #[test]
    fn test_vendor_classification() {
        assert_eq!(Vendor::classify("androidx.room"), Vendor::AndroidX);
        assert_eq!(Vendor::classify("com.google.dagger"), Vendor::Google);
        assert_eq!(Vendor::classify("com.android.tools"), Vendor::Google);
        assert_eq!(Vendor::classify("android.arch.lifecycle"), Vendor::Google);
        assert_eq!(Vendor::classify("org.jetbrains.kotlinx"), Vendor::JetBrains);
        assert_eq!(Vendor::classify("io.ktor"), Vendor::Other);
        assert_eq!(Vendor::classify("org.apache.commons"), Vendor::Other);
    }

    #[test]
    fn test_vendor_requires_full_prefix() {
        // "androidx" without the trailing dot is not an AndroidX group.
        assert_eq!(Vendor::classify("androidx"), Vendor::Other);
        assert_eq!(Vendor::classify("androidxtra.lib"), Vendor::Other);
    }

    #[test]
    fn test_vendor_labels() {
        assert_eq!(Vendor::AndroidX.label(), "AndroidX");
        assert_eq!(Vendor::Other.to_string(), "Other");
    }
}
