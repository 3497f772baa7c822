//! Maven version ordering and pre-release detection.

use std::cmp::Ordering;

/// Detects if a Maven version string is a pre-release.
///
/// Maven pre-release qualifiers: SNAPSHOT, alpha, beta, rc, dev,
/// M (milestone).
pub fn is_prerelease(version: &str) -> bool {
    let v = version.to_uppercase();
    v.contains("-SNAPSHOT")
        || v.contains("-ALPHA")
        || v.contains("-BETA")
        || v.contains("-RC")
        || v.contains(".RC")
        || v.contains("-DEV")
        || contains_milestone_qualifier(&v)
}

fn contains_milestone_qualifier(upper: &str) -> bool {
    // Match -M followed by digits: e.g. -M1, -M2, -M10
    let bytes = upper.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == b'-'
            && bytes[i + 1] == b'M'
            && upper[i + 2..].starts_with(|c: char| c.is_ascii_digit())
        {
            return true;
        }
    }
    false
}

/// Compares two Maven version strings segment by segment.
///
/// Versions split on `.`, `-` and `_`. Numeric segments compare numerically,
/// string segments lexicographically, and a numeric segment outranks a
/// string segment at the same position. A missing trailing segment counts as
/// `"0"`, which is how `1.9.0` ends up above `1.9.0-beta01`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts = split_version(a);
    let b_parts = split_version(b);

    let max_len = a_parts.len().max(b_parts.len());
    for i in 0..max_len {
        let ap = a_parts.get(i).copied().unwrap_or("0");
        let bp = b_parts.get(i).copied().unwrap_or("0");

        let ord = compare_segment(ap, bp);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

fn split_version(v: &str) -> Vec<&str> {
    v.split(['.', '-', '_']).filter(|s| !s.is_empty()).collect()
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(an), Ok(bn)) => an.cmp(&bn),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerelease_detection() {
        assert!(is_prerelease("1.0.0-SNAPSHOT"));
        assert!(is_prerelease("1.0.0-alpha"));
        assert!(is_prerelease("2.8.0-alpha03"));
        assert!(is_prerelease("1.9.0-beta01"));
        assert!(is_prerelease("1.0.0-rc1"));
        assert!(is_prerelease("1.0.0-RC1"));
        assert!(is_prerelease("2.0.0-M1"));
        assert!(is_prerelease("2.0.0-M10"));
        assert!(is_prerelease("1.7.0-dev1234"));
    }

    #[test]
    fn test_stable_versions() {
        assert!(!is_prerelease("1.0.0"));
        assert!(!is_prerelease("3.14.0"));
        assert!(!is_prerelease("1.2.3.Final"));
        assert!(!is_prerelease("2.0.RELEASE"));
    }

    #[test]
    fn test_version_comparison() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.1", "1.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("10.0.0", "9.0.0"), Ordering::Greater);
    }

    #[test]
    fn test_release_outranks_prerelease_of_same_version() {
        assert_eq!(
            compare_versions("1.9.0", "1.9.0-beta01"),
            Ordering::Greater
        );
        assert_eq!(
            compare_versions("2.0.0-alpha01", "2.0.0"),
            Ordering::Less
        );
    }

    #[test]
    fn test_qualifiers_compare_lexicographically() {
        assert_eq!(
            compare_versions("1.0.0-beta02", "1.0.0-beta01"),
            Ordering::Greater
        );
        assert_eq!(
            compare_versions("1.0.0-alpha05", "1.0.0-beta01"),
            Ordering::Less
        );
    }

    #[test]
    fn test_underscore_is_a_separator() {
        assert_eq!(compare_versions("1_2_0", "1.1.9"), Ordering::Greater);
    }

    #[test]
    fn test_missing_segments_pad_as_zero() {
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn test_descending_sort_order() {
        let mut versions = vec!["1.9.0-beta01", "2.0.0", "1.9.0", "1.10.0"];
        versions.sort_by(|a, b| compare_versions(b, a));
        assert_eq!(versions, vec!["2.0.0", "1.10.0", "1.9.0", "1.9.0-beta01"]);
    }
}
