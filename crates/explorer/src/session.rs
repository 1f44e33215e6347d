//! Expansion engine
//!
//! Core logic for growing the citation and authorship graphs: recursive,
//! depth-first expansion of document references, bounded by the session's
//! target depth and by a popularity gate on reference in-degree. Every
//! remote failure is caught at the fetch call site and recorded; one bad id
//! never aborts a batch.

use crate::checkpoint::{CheckpointBundle, CheckpointManager};
use crate::graph::{AuthorshipGraph, CitationGraph, NodeAttrs};
use crate::quota::QuotaTracker;
use crate::store::RecordStore;
use citenetx_common::model::DocumentRecord;
use citenetx_common::{Eid, Result};
use citenetx_retrieval::DocumentSource;
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Minimum in-degree before a reference is worth the cost of a remote
/// fetch. Expansion would otherwise fan out exponentially with depth
/// against a rate-limited source.
pub const MIN_INDEGREE_TO_EXPAND: usize = 3;

/// Default in-degree bar for [`ExplorerSession::suggest_expansions`]
const SUGGEST_THRESHOLD: usize = 10;

/// Caller-supplied flags merged into a fetched node's attributes
pub type FlagMap = BTreeMap<String, Value>;

/// Pulls data from the remote source and manages the data pulled
///
/// Owns all mutable crawl state; nothing else writes to the store or the
/// graphs while an expansion is in flight. Fetches run strictly
/// sequentially, so the source's shared quota is observed in order.
pub struct ExplorerSession {
    source: Arc<dyn DocumentSource>,
    checkpoints: CheckpointManager,
    store: RecordStore,
    citations: CitationGraph,
    authorship: AuthorshipGraph,
    quota: QuotaTracker,
    fails: Vec<String>,
    target_depth: u32,
}

impl ExplorerSession {
    pub fn new(source: Arc<dyn DocumentSource>, checkpoints: CheckpointManager) -> Self {
        Self {
            source,
            checkpoints,
            store: RecordStore::new(),
            citations: CitationGraph::new(),
            authorship: AuthorshipGraph::new(),
            quota: QuotaTracker::new(),
            fails: Vec::new(),
            target_depth: 0,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn citation_graph(&self) -> &CitationGraph {
        &self.citations
    }

    pub fn authorship_graph(&self) -> &AuthorshipGraph {
        &self.authorship
    }

    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    /// Identifiers whose fetch attempts failed, in order, repeats included
    pub fn fails(&self) -> &[String] {
        &self.fails
    }

    pub fn target_depth(&self) -> u32 {
        self.target_depth
    }

    /// Expand a single document at depth 0
    pub async fn expand_document(&mut self, eid: &Eid, report: bool, flags: &FlagMap) {
        self.expand(eid, 0, report, flags).await;
    }

    /// Expand a batch of seed documents at depth 0.
    ///
    /// `target_depth` is sticky: `Some` replaces the session's depth for
    /// this and later calls, `None` keeps whatever was set before.
    #[instrument(skip(self, eids, flags), fields(batch = eids.len()))]
    pub async fn expand_documents(&mut self, eids: &[Eid], target_depth: Option<u32>, flags: &FlagMap) {
        if let Some(depth) = target_depth {
            self.target_depth = depth;
        }

        let total = eids.len();
        for (index, eid) in eids.iter().enumerate() {
            self.expand(eid, 0, false, flags).await;
            let percent = (index + 1) as f64 / total as f64 * 100.0;
            info!(done = index + 1, total, "batch progress: {percent:.2}%");
        }
    }

    /// Expand every seed id listed in a newline-delimited text file
    pub async fn expand_from_file(&mut self, path: &Path, target_depth: Option<u32>, flags: &FlagMap) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let eids: Vec<Eid> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Eid::from)
            .collect();

        info!(seeds = eids.len(), path = %path.display(), "expanding seed file");
        self.expand_documents(&eids, target_depth, flags).await;
        Ok(())
    }

    /// Pull all publications of one author and expand them at depth 0
    #[instrument(skip(self, flags))]
    pub async fn expand_author(&mut self, auid: &str, flags: &FlagMap) {
        let source = Arc::clone(&self.source);
        match source.fetch_author(auid).await {
            Ok(author) => {
                info!(auid, documents = author.document_eids.len(), "author publications pulled");
                self.expand_documents(&author.document_eids, None, flags).await;
            }
            Err(error) => {
                self.fails.push(auid.to_string());
                warn!(auid, error = %error, "author failed to pull");
            }
        }
    }

    /// [`ExplorerSession::expand_author`], for a list of author ids
    pub async fn expand_authors(&mut self, auids: &[String], flags: &FlagMap) {
        let total = auids.len();
        for (index, auid) in auids.iter().enumerate() {
            self.expand_author(auid, flags).await;
            let percent = (index + 1) as f64 / total as f64 * 100.0;
            info!(done = index + 1, total, "author batch progress: {percent:.2}%");
        }
    }

    /// Expand one identifier at the given depth.
    ///
    /// An id already in the store is not refetched and its node attributes
    /// are left alone, but its references are re-examined: a document
    /// first seen at shallow depth may be revisited in a context where its
    /// references have become eligible. Boxed because the reference walk
    /// recurses back into this function.
    fn expand<'a>(&'a mut self, eid: &'a Eid, depth: u32, report: bool, flags: &'a FlagMap) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if let Some(record) = self.store.get(eid).cloned() {
                self.expand_references(&record, depth).await;
                return;
            }

            let source = Arc::clone(&self.source);
            match source.fetch_document(eid).await {
                Ok(record) => {
                    self.quota.observe(&record.quota);
                    self.store.add(record.clone());

                    self.citations.set_attrs(&record.eid, NodeAttrs { year: record.year, flags: flags.clone() });

                    if report {
                        info!(record = %record, "document pulled");
                    }

                    if !record.authors.is_empty() {
                        self.authorship.add_document(&record.eid);
                        for author in &record.authors {
                            self.authorship.add_author(&author.auid, &author.indexed_name);
                            self.authorship.add_authorship(&record.eid, &author.auid);
                        }
                    }

                    self.expand_references(&record, depth).await;
                }
                Err(error) => {
                    self.fails.push(eid.to_string());
                    warn!(eid = %eid, error = %error, "failed to pull");
                }
            }
        })
    }

    /// Walk a record's references: every one gets a citation edge (stub
    /// nodes included), but only popular ones are fetched.
    async fn expand_references(&mut self, record: &DocumentRecord, depth: u32) {
        for reference in &record.references {
            let reference_eid = Eid::from_scopus_id(reference);

            // unconditional: the edge is knowledge we already paid for
            self.citations.add_edge(&record.eid, &reference_eid);

            if depth < self.target_depth
                && self.citations.in_degree(&reference_eid) >= MIN_INDEGREE_TO_EXPAND
            {
                // only pull once enough already-processed documents cite it
                let fresh_flags = FlagMap::new();
                self.expand(&reference_eid, depth + 1, false, &fresh_flags).await;
            }
        }
    }

    /// Unfetched nodes popular enough to be worth adding next, most cited
    /// first
    pub fn suggest_expansions(&self, threshold: Option<usize>) -> Vec<(Eid, usize)> {
        let threshold = threshold.unwrap_or(SUGGEST_THRESHOLD);
        let mut suggestions: Vec<(Eid, usize)> = self
            .citations
            .nodes()
            .filter(|(eid, _)| !self.store.contains(eid))
            .map(|(eid, _)| (eid.clone(), self.citations.in_degree(eid)))
            .filter(|(_, in_degree)| *in_degree >= threshold)
            .collect();
        suggestions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        suggestions
    }

    /// Persist the store and both graphs under the given key (or a
    /// timestamp key); returns the written path
    pub fn save_checkpoint(&self, key: Option<&str>) -> Result<PathBuf> {
        let bundle = CheckpointBundle {
            documents: self.store.records().to_vec(),
            citations: self.citations.clone(),
            authorship: self.authorship.clone(),
        };
        self.checkpoints.save(&bundle, key)
    }

    /// Restore the store and both graphs from a saved checkpoint.
    ///
    /// On any failure the in-memory state is left untouched; the error is
    /// logged and returned for the caller to inspect.
    pub fn load_checkpoint(&mut self, key: &str) -> Result<()> {
        match self.checkpoints.load(key) {
            Ok(bundle) => {
                self.store = RecordStore::from(bundle.documents);
                self.citations = bundle.citations;
                self.authorship = bundle.authorship;
                info!(key, documents = self.store.len(), "checkpoint restored");
                Ok(())
            }
            Err(error) => {
                warn!(key, error = %error, "failed to load checkpoint");
                Err(error)
            }
        }
    }
}

impl fmt::Display for ExplorerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents pulled.\n\
             {} failed pulls.\n\
             {} total publications graphed.\n\
             {} total nodes graphed.\n\
             Current target depth = {}.",
            self.store.len(),
            self.fails.len(),
            self.citations.node_count(),
            self.authorship.node_count(),
            self.target_depth
        )
    }
}
