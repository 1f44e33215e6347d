//! Record-retrieval source contract

use async_trait::async_trait;
use citenetx_common::model::{AuthorRecord, DocumentRecord};
use citenetx_common::{Eid, Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Trait for fetching bibliographic records from a remote source
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a single document record by its canonical EID
    async fn fetch_document(&self, eid: &Eid) -> Result<DocumentRecord>;

    /// Fetch an author's publication list by author id
    async fn fetch_author(&self, auid: &str) -> Result<AuthorRecord>;
}

/// In-memory source for tests
///
/// Serves pre-loaded records, fails on scripted ids, and keeps a log of
/// every fetch so tests can assert exactly what was pulled and how often.
#[derive(Default)]
pub struct MockSource {
    documents: HashMap<Eid, DocumentRecord>,
    authors: HashMap<String, AuthorRecord>,
    failures: HashSet<String>,
    log: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, record: DocumentRecord) -> Self {
        self.documents.insert(record.eid.clone(), record);
        self
    }

    pub fn with_author(mut self, record: AuthorRecord) -> Self {
        self.authors.insert(record.auid.clone(), record);
        self
    }

    /// Script a failure for a document EID or author id
    pub fn with_failure(mut self, id: impl Into<String>) -> Self {
        self.failures.insert(id.into());
        self
    }

    /// All fetch attempts in order, successful or not
    pub fn fetch_log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// How many times the given id was fetched
    pub fn fetch_count(&self, id: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|entry| *entry == id).count()
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    async fn fetch_document(&self, eid: &Eid) -> Result<DocumentRecord> {
        self.log.lock().unwrap().push(eid.to_string());
        if self.failures.contains(eid.as_str()) {
            return Err(Error::Upstream { status: 500, message: "scripted failure".into() });
        }
        self.documents
            .get(eid)
            .cloned()
            .ok_or_else(|| Error::RecordNotFound { id: eid.to_string() })
    }

    async fn fetch_author(&self, auid: &str) -> Result<AuthorRecord> {
        self.log.lock().unwrap().push(auid.to_string());
        if self.failures.contains(auid) {
            return Err(Error::Upstream { status: 500, message: "scripted failure".into() });
        }
        self.authors
            .get(auid)
            .cloned()
            .ok_or_else(|| Error::RecordNotFound { id: auid.to_string() })
    }
}
