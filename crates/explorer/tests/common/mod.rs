//! Shared fixtures for explorer integration tests
#![allow(dead_code)]

use citenetx_common::model::{AuthorRef, DocumentRecord, QuotaSnapshot};
use citenetx_common::Eid;
use citenetx_explorer::{CheckpointManager, ExplorerSession};
use citenetx_retrieval::MockSource;
use std::sync::Arc;

/// Minimal document record with bare (unprefixed) reference ids
pub fn doc(id: &str, year: i32, references: &[&str]) -> DocumentRecord {
    DocumentRecord {
        eid: Eid::from_scopus_id(id),
        title: format!("doc {id}"),
        publication_name: None,
        cover_date: None,
        year: Some(year),
        doi: None,
        cited_by_count: None,
        authors: vec![],
        references: references.iter().map(|r| r.to_string()).collect(),
        subject_areas: vec![],
        scopus_link: None,
        metadata: serde_json::Value::Null,
        quota: QuotaSnapshot::default(),
    }
}

pub fn doc_with_authors(
    id: &str,
    year: i32,
    references: &[&str],
    authors: &[(&str, &str)],
) -> DocumentRecord {
    let mut record = doc(id, year, references);
    record.authors = authors
        .iter()
        .map(|(auid, name)| AuthorRef { auid: auid.to_string(), indexed_name: name.to_string() })
        .collect();
    record
}

pub fn doc_with_quota(id: &str, year: i32, remaining: u64) -> DocumentRecord {
    let mut record = doc(id, year, &[]);
    record.quota = QuotaSnapshot { remaining: Some(remaining), reset_at: None };
    record
}

/// Session over a mock source; the returned handle observes the fetch log
pub fn session_over(source: MockSource) -> (Arc<MockSource>, ExplorerSession) {
    let source = Arc::new(source);
    let checkpoints = CheckpointManager::new(std::env::temp_dir(), "ExplorerTestUnused");
    let session = ExplorerSession::new(source.clone(), checkpoints);
    (source, session)
}
