//! Relevance scoring for search results.
//!
//! Scoring is a pure function of one record and the query keyword. Rules
//! are additive and case-insensitive, so an exact artifact match also
//! collects the prefix and substring bonuses and always lands above a mere
//! prefix match, which in turn lands above a substring match.

use std::cmp::Reverse;

use crate::types::{LibraryRecord, Vendor, known_vendor_prefixes};

/// Suffixes that mark a Kotlin-flavored companion artifact.
const KOTLIN_SUFFIXES: &[&str] = &["-ktx", "-compose"];

/// Artifacts longer than the keyword by this many bytes lose a small
/// penalty.
const LONG_NAME_SLACK: usize = 30;

/// Scores `record` against `keyword`. Higher is more relevant; unrelated
/// records converge on zero.
pub fn score(record: &LibraryRecord, keyword: &str) -> i32 {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return 0;
    }

    let artifact = record.coordinate.artifact.to_lowercase();
    let group = record.coordinate.group.to_lowercase();

    let mut score = 0;

    if artifact == keyword {
        score += 200;
    }
    if KOTLIN_SUFFIXES
        .iter()
        .any(|suffix| artifact == format!("{keyword}{suffix}"))
    {
        score += 180;
    }
    if artifact.starts_with(&keyword) {
        score += 100;
    }
    if artifact.starts_with(&format!("{keyword}-")) {
        score += 90;
    }
    if artifact.contains(&format!("-{keyword}-")) {
        score += 70;
    }
    if artifact.contains(&format!("-{keyword}")) {
        score += 60;
    }
    if artifact.contains(&format!("{keyword}-")) {
        score += 50;
    }
    if artifact.contains(&keyword) {
        score += 40;
    }
    if group.contains(&keyword) {
        score += 30;
    }
    if known_vendor_prefixes().any(|prefix| group == format!("{prefix}{keyword}")) {
        score += 150;
    }
    match Vendor::classify(&group) {
        Vendor::AndroidX => score += 40,
        Vendor::Google => score += 30,
        Vendor::JetBrains => score += 20,
        Vendor::Other => {}
    }
    if artifact.len() > keyword.len() + LONG_NAME_SLACK {
        score -= 10;
    }
    if KOTLIN_SUFFIXES.iter().any(|suffix| artifact.ends_with(suffix)) {
        score += 10;
    }

    score
}

/// A record paired with its relevance for one keyword. Never persisted; the
/// score is recomputed per search.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: LibraryRecord,
    pub score: i32,
}

/// Orders records by descending relevance. The sort is stable, so equal
/// scores keep their input order.
pub fn rank(records: Vec<LibraryRecord>, keyword: &str) -> Vec<LibraryRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| ScoredRecord {
            score: score(&record, keyword),
            record,
        })
        .collect();

    scored.sort_by_key(|s| Reverse(s.score));
    scored.into_iter().map(|s| s.record).collect()
}
