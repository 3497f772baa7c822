//! Streaming keyword search across both registries.
//!
//! A search runs as one spawned producer task walking phases in a fixed
//! order: pattern probes against maven.google.com metadata, then one broad
//! Solr phase per vendor bucket (AndroidX, JetBrains, everything else).
//! Hits stream to the consumer as each phase produces them, and a
//! coordinate is emitted at most once per search no matter how many phases
//! or backends return it. Dropping or cancelling the stream stops the
//! producer at its next send or pre-request check.

use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::mpsc;

use catalog_core::HttpClient;

use crate::patterns::PatternBook;
use crate::registry::{GoogleMavenClient, MavenCentralClient};
use crate::score::rank;
use crate::types::{Coordinate, LibraryRecord, SearchHit, Vendor};

/// Tuning knobs for [`CatalogSearcher`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Keywords shorter than this (after trimming) end the search
    /// immediately with zero emissions and zero requests.
    pub min_keyword_len: usize,
    /// Rows requested per broad Solr query.
    pub broad_search_rows: usize,
    /// Emission channel capacity. A slow consumer backpressures the
    /// producer instead of piling up hits.
    pub channel_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: 3,
            broad_search_rows: 50,
            channel_capacity: 32,
        }
    }
}

/// Receiving side of one search.
///
/// Dropping the stream, or calling [`SearchStream::cancel`], stops the
/// producer task; after `cancel` returns, no hit is delivered.
pub struct SearchStream {
    rx: mpsc::Receiver<SearchHit>,
}

impl SearchStream {
    /// Next hit, or `None` once the search is exhausted or cancelled.
    pub async fn next(&mut self) -> Option<SearchHit> {
        self.rx.recv().await
    }

    /// Stops the search and discards hits already in flight. In-progress
    /// network requests finish on their own; their results go nowhere.
    pub fn cancel(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }

    /// Drains the stream to completion.
    pub async fn collect_all(mut self) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        while let Some(hit) = self.next().await {
            hits.push(hit);
        }
        hits
    }

    /// A stream that is already over.
    fn closed() -> Self {
        let (_, rx) = mpsc::channel(1);
        Self { rx }
    }
}

impl futures::Stream for SearchStream {
    type Item = SearchHit;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// Per-search producer state: the normalized keyword, the emitted set, and
/// the sending half of the stream.
struct SearchSession {
    keyword: String,
    seen: HashSet<Coordinate>,
    tx: mpsc::Sender<SearchHit>,
}

impl SearchSession {
    fn new(keyword: String, tx: mpsc::Sender<SearchHit>) -> Self {
        Self {
            keyword,
            seen: HashSet::new(),
            tx,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }

    /// Sends one hit unless its coordinate was already emitted this search.
    /// Returns `false` when the consumer has gone away.
    async fn emit(&mut self, record: LibraryRecord, vendor: Vendor) -> bool {
        if !self.seen.insert(record.coordinate.clone()) {
            return true;
        }
        self.tx.send(SearchHit { record, vendor }).await.is_ok()
    }
}

/// Streaming search over maven.google.com and the Maven Central index.
#[derive(Clone)]
pub struct CatalogSearcher {
    google: GoogleMavenClient,
    central: MavenCentralClient,
    patterns: PatternBook,
    config: SearchConfig,
}

impl CatalogSearcher {
    pub fn new(http: HttpClient) -> Self {
        Self::with_clients(
            GoogleMavenClient::new(http.clone()),
            MavenCentralClient::new(http),
        )
    }

    /// Builds a searcher around preconfigured clients (mirrors, tests).
    pub fn with_clients(google: GoogleMavenClient, central: MavenCentralClient) -> Self {
        Self {
            google,
            central,
            patterns: PatternBook::builtin(),
            config: SearchConfig::default(),
        }
    }

    /// Replaces the shortcut table used by the pattern-probe phase.
    pub fn with_patterns(mut self, patterns: PatternBook) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts a streaming search for `keyword`, spawning the producer on
    /// the current Tokio runtime.
    ///
    /// A keyword below the configured minimum length returns an
    /// already-ended stream; nothing is spawned and no request is made.
    pub fn search(&self, keyword: &str) -> SearchStream {
        let keyword = keyword.trim().to_lowercase();
        if keyword.chars().count() < self.config.min_keyword_len {
            tracing::debug!(%keyword, "keyword below minimum length, not searching");
            return SearchStream::closed();
        }

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let searcher = self.clone();
        tokio::spawn(async move {
            let mut session = SearchSession::new(keyword, tx);
            searcher.run_phases(&mut session).await;
        });

        SearchStream { rx }
    }

    /// Collects hits until the stream ends or `budget` elapses. On timeout
    /// the stream is dropped, which cancels the remaining phases.
    pub async fn search_collect(&self, keyword: &str, budget: Duration) -> Vec<SearchHit> {
        let mut stream = self.search(keyword);
        let deadline = tokio::time::Instant::now() + budget;

        let mut hits = Vec::new();
        while let Ok(Some(hit)) = tokio::time::timeout_at(deadline, stream.next()).await {
            hits.push(hit);
        }
        hits
    }

    async fn run_phases(&self, session: &mut SearchSession) {
        tracing::debug!(keyword = %session.keyword, "search started");

        if !self.pattern_probe_phase(session).await {
            return;
        }
        for vendor in [Vendor::AndroidX, Vendor::JetBrains, Vendor::Other] {
            if !self.broad_search_phase(session, vendor).await {
                return;
            }
        }

        tracing::debug!(
            keyword = %session.keyword,
            emitted = session.seen.len(),
            "search finished"
        );
    }

    /// Probes each candidate coordinate against the metadata backend and
    /// emits hits in candidate order.
    async fn pattern_probe_phase(&self, session: &mut SearchSession) -> bool {
        for coordinate in self.patterns.candidates(&session.keyword) {
            if session.is_cancelled() {
                return false;
            }

            let Some(version) = self.google.latest_version(&coordinate).await else {
                continue;
            };

            let vendor = Vendor::classify(&coordinate.group);
            let record = LibraryRecord {
                coordinate,
                latest_version: version,
            };
            if !session.emit(record, vendor).await {
                return false;
            }
        }
        true
    }

    /// Runs one vendor's broad Solr queries, merges and ranks the results,
    /// and emits them in descending relevance order.
    async fn broad_search_phase(&self, session: &mut SearchSession, vendor: Vendor) -> bool {
        let mut merged: Vec<LibraryRecord> = Vec::new();
        let mut in_phase: HashSet<Coordinate> = HashSet::new();

        for query in phase_queries(vendor, &session.keyword) {
            if session.is_cancelled() {
                return false;
            }

            for record in self.central.search(&query, self.config.broad_search_rows).await {
                if Vendor::classify(&record.coordinate.group) != vendor {
                    continue;
                }
                if in_phase.insert(record.coordinate.clone()) {
                    merged.push(record);
                }
            }
        }

        for record in rank(merged, &session.keyword) {
            if !session.emit(record, vendor).await {
                return false;
            }
        }
        true
    }
}

/// Solr queries issued for one broad-search phase.
fn phase_queries(vendor: Vendor, keyword: &str) -> Vec<String> {
    match vendor {
        Vendor::AndroidX => vec![format!("g:androidx* AND a:{keyword}*")],
        Vendor::JetBrains => vec![format!("g:org.jetbrains* AND a:{keyword}*")],
        // Google coordinates surface through the pattern probes; no broad
        // phase queries for them.
        Vendor::Google => Vec::new(),
        Vendor::Other => vec![format!("a:{keyword}*"), keyword.to_string()],
    }
}
