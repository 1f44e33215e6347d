//! Bibliographic record model
//!
//! Snapshots of what the remote source returned for a document or an
//! author. Records are immutable once fetched; absent reference or author
//! lists are represented as empty vectors and skipped by consumers.

use crate::ids::Eid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One author entry on a document record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Scopus author id
    pub auid: String,

    /// Indexed display name, e.g. "Rebstock M."
    pub indexed_name: String,
}

/// Subject-area classification attached to a document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectArea {
    /// Full area name, e.g. "Environmental Science"
    pub area: String,

    /// Short code, e.g. "ENVI"
    pub abbreviation: Option<String>,

    /// Numeric classification code as reported by the source
    pub code: Option<String>,
}

/// Quota fields observed on a single successful fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    /// Calls remaining on the API key, if reported
    #[serde(default)]
    pub remaining: Option<u64>,

    /// When the key's quota resets, if reported
    #[serde(default)]
    pub reset_at: Option<DateTime<Utc>>,
}

/// A fetched document, immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Canonical identifier; the graph node key
    pub eid: Eid,

    pub title: String,

    pub publication_name: Option<String>,

    /// ISO cover date as reported, e.g. "2019-03-01"
    pub cover_date: Option<String>,

    /// 4-digit publication year derived from the cover date
    pub year: Option<i32>,

    pub doi: Option<String>,

    pub cited_by_count: Option<u64>,

    /// Ordered authors; empty when the source reported none
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Ordered reference ids in bare (unprefixed) form; empty when the
    /// source reported none
    #[serde(default)]
    pub references: Vec<String>,

    #[serde(default)]
    pub subject_areas: Vec<SubjectArea>,

    pub scopus_link: Option<String>,

    /// Arbitrary source metadata kept verbatim
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Quota fields observed when this record was fetched
    #[serde(default)]
    pub quota: QuotaSnapshot,
}

impl fmt::Display for DocumentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}] - {} author(s), {} reference(s)",
            self.title,
            self.year.map_or_else(|| "year unknown".to_string(), |y| y.to_string()),
            self.eid,
            self.authors.len(),
            self.references.len()
        )
    }
}

/// An author profile reduced to its publication list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Scopus author id
    pub auid: String,

    /// EIDs of the author's publications
    pub document_eids: Vec<Eid>,
}
