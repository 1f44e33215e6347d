//! Deduplicated record store
//!
//! Insertion-ordered, append-only collection of fetched records, one per
//! EID. The store itself does not enforce uniqueness; the expansion engine
//! checks membership before every fetch. Serializes as the plain record
//! vector.

use citenetx_common::model::DocumentRecord;
use citenetx_common::Eid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DocumentRecord>", into = "Vec<DocumentRecord>")]
pub struct RecordStore {
    records: Vec<DocumentRecord>,
    index: HashMap<Eid, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, eid: &Eid) -> bool {
        self.index.contains_key(eid)
    }

    /// Look up a stored record so callers can reuse it without a fetch
    pub fn get(&self, eid: &Eid) -> Option<&DocumentRecord> {
        self.index.get(eid).map(|&position| &self.records[position])
    }

    /// Append a record; duplicate prevention is the caller's job
    pub fn add(&mut self, record: DocumentRecord) {
        self.index.insert(record.eid.clone(), self.records.len());
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }
}

impl From<Vec<DocumentRecord>> for RecordStore {
    fn from(records: Vec<DocumentRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.eid.clone(), position))
            .collect();
        Self { records, index }
    }
}

impl From<RecordStore> for Vec<DocumentRecord> {
    fn from(store: RecordStore) -> Self {
        store.records
    }
}
