//! Checkpoint save/restore across sessions

mod common;

use citenetx_common::{Eid, Error};
use citenetx_explorer::{CheckpointManager, ExplorerSession, FlagMap};
use citenetx_retrieval::MockSource;
use common::{doc, doc_with_authors};
use std::sync::Arc;

fn eid(id: &str) -> Eid {
    Eid::from_scopus_id(id)
}

fn populated_source() -> MockSource {
    MockSource::new()
        .with_document(doc_with_authors("s", 2020, &["r1", "r2"], &[("100", "Kitchin J.")]))
        .with_document(doc("other", 2018, &[]))
}

async fn populated_session(manager: CheckpointManager) -> ExplorerSession {
    let mut session = ExplorerSession::new(Arc::new(populated_source()), manager);
    session.expand_documents(&[eid("s"), eid("other")], Some(0), &FlagMap::new()).await;
    session
}

#[tokio::test]
async fn test_roundtrip_restores_equivalent_state() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path(), "CiteNetXCheckpoints");

    let saved = populated_session(manager.clone()).await;
    saved.save_checkpoint(Some("run1")).unwrap();

    // a fresh session over an empty source restores everything from disk
    let source = Arc::new(MockSource::new());
    let mut restored = ExplorerSession::new(source.clone(), manager);
    restored.load_checkpoint("run1").unwrap();

    assert_eq!(restored.store(), saved.store());
    assert_eq!(restored.citation_graph(), saved.citation_graph());
    assert_eq!(restored.authorship_graph(), saved.authorship_graph());

    // restored records dedupe exactly like freshly fetched ones
    restored.expand_documents(&[eid("s")], None, &FlagMap::new()).await;
    assert!(source.fetch_log().is_empty());
    assert_eq!(restored.store().len(), saved.store().len());
}

#[tokio::test]
async fn test_unknown_key_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path(), "CiteNetXCheckpoints");

    let mut session = populated_session(manager).await;
    let documents_before = session.store().len();
    let nodes_before = session.citation_graph().node_count();

    let err = session.load_checkpoint("never-saved").unwrap_err();
    assert!(matches!(err, Error::CheckpointNotFound { .. }));
    assert_eq!(session.store().len(), documents_before);
    assert_eq!(session.citation_graph().node_count(), nodes_before);
}

#[tokio::test]
async fn test_corrupt_checkpoint_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path(), "CiteNetXCheckpoints");
    std::fs::write(dir.path().join("CiteNetXCheckpointsbroken.json"), b"not json at all").unwrap();

    let mut session = populated_session(manager).await;
    let documents_before = session.store().len();

    let err = session.load_checkpoint("broken").unwrap_err();
    assert!(matches!(err, Error::CheckpointCorrupt { .. }));
    assert_eq!(session.store().len(), documents_before);
}

#[tokio::test]
async fn test_saving_under_two_keys_keeps_both() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path(), "CiteNetXCheckpoints");

    let session = populated_session(manager.clone()).await;
    session.save_checkpoint(Some("first")).unwrap();
    session.save_checkpoint(Some("second")).unwrap();

    let empty = ExplorerSession::new(Arc::new(MockSource::new()), manager);
    let mut from_first = empty;
    from_first.load_checkpoint("first").unwrap();
    assert_eq!(from_first.store().len(), 2);

    let mut from_second = ExplorerSession::new(
        Arc::new(MockSource::new()),
        CheckpointManager::new(dir.path(), "CiteNetXCheckpoints"),
    );
    from_second.load_checkpoint("second").unwrap();
    assert_eq!(from_second.store().len(), 2);
}
