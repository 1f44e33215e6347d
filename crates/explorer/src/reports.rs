//! Distribution tables over the record store
//!
//! Tabular views of what has been pulled so far: publication years, author
//! frequencies, subject areas, and a flat per-document summary. All of them
//! read the store through shared references and return typed, sorted rows.

use crate::store::RecordStore;
use citenetx_common::model::SubjectArea;
use citenetx_common::Eid;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorCount {
    pub auid: String,
    pub indexed_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectCount {
    pub subject: SubjectArea,
    pub count: usize,
}

/// One row per stored document, in pull order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub eid: Eid,
    pub title: String,
    pub publication_name: Option<String>,
    pub year: Option<i32>,
    pub cited_by_count: Option<u64>,
    pub doi: Option<String>,
}

/// Publication-year distribution, ascending by year
pub fn year_distribution(store: &RecordStore) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in store.iter() {
        if let Some(year) = record.year {
            *counts.entry(year).or_default() += 1;
        }
    }
    counts.into_iter().map(|(year, count)| YearCount { year, count }).collect()
}

/// Author frequency across stored documents, most frequent first
pub fn author_distribution(store: &RecordStore) -> Vec<AuthorCount> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for record in store.iter() {
        for author in &record.authors {
            *counts.entry((author.auid.clone(), author.indexed_name.clone())).or_default() += 1;
        }
    }
    let mut rows: Vec<AuthorCount> = counts
        .into_iter()
        .map(|((auid, indexed_name), count)| AuthorCount { auid, indexed_name, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.auid.cmp(&b.auid)));
    rows
}

/// Subject-area distribution across stored documents, most frequent first
pub fn subject_distribution(store: &RecordStore) -> Vec<SubjectCount> {
    let mut counts: BTreeMap<SubjectArea, usize> = BTreeMap::new();
    for record in store.iter() {
        for subject in &record.subject_areas {
            *counts.entry(subject.clone()).or_default() += 1;
        }
    }
    let mut rows: Vec<SubjectCount> =
        counts.into_iter().map(|(subject, count)| SubjectCount { subject, count }).collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.subject.cmp(&b.subject)));
    rows
}

/// Flat summary of every stored document
pub fn document_table(store: &RecordStore) -> Vec<DocumentSummary> {
    store
        .iter()
        .map(|record| DocumentSummary {
            eid: record.eid.clone(),
            title: record.title.clone(),
            publication_name: record.publication_name.clone(),
            year: record.year,
            cited_by_count: record.cited_by_count,
            doi: record.doi.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citenetx_common::model::{AuthorRef, DocumentRecord};

    fn record(id: &str, year: i32, authors: &[(&str, &str)]) -> DocumentRecord {
        DocumentRecord {
            eid: Eid::from_scopus_id(id),
            title: format!("doc {id}"),
            publication_name: None,
            cover_date: None,
            year: Some(year),
            doi: None,
            cited_by_count: None,
            authors: authors
                .iter()
                .map(|(auid, name)| AuthorRef { auid: auid.to_string(), indexed_name: name.to_string() })
                .collect(),
            references: vec![],
            subject_areas: vec![],
            scopus_link: None,
            metadata: serde_json::Value::Null,
            quota: Default::default(),
        }
    }

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add(record("1", 2019, &[("a1", "Kitchin J."), ("a2", "Rose M.")]));
        store.add(record("2", 2019, &[("a1", "Kitchin J.")]));
        store.add(record("3", 2017, &[]));
        store
    }

    #[test]
    fn test_year_distribution_ascending() {
        let rows = year_distribution(&store());
        assert_eq!(
            rows,
            vec![YearCount { year: 2017, count: 1 }, YearCount { year: 2019, count: 2 }]
        );
    }

    #[test]
    fn test_author_distribution_most_frequent_first() {
        let rows = author_distribution(&store());
        assert_eq!(rows[0].auid, "a1");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_empty_store_yields_empty_tables() {
        let empty = RecordStore::new();
        assert!(year_distribution(&empty).is_empty());
        assert!(author_distribution(&empty).is_empty());
        assert!(subject_distribution(&empty).is_empty());
        assert!(document_table(&empty).is_empty());
    }

    #[test]
    fn test_document_table_in_pull_order() {
        let rows = document_table(&store());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].eid, Eid::from_scopus_id("1"));
        assert_eq!(rows[2].year, Some(2017));
    }
}
