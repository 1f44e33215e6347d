//! Permissive extraction of records from Scopus response bodies
//!
//! Elsevier's envelopes vary: list-valued fields collapse to bare objects
//! when there is a single element, counts arrive as strings, and whole
//! blocks (references, authors, subject areas) are simply absent on some
//! documents. Everything optional degrades to empty/None; only a missing
//! envelope or missing EID is treated as malformed.

use citenetx_common::model::{AuthorRef, DocumentRecord, QuotaSnapshot, SubjectArea};
use citenetx_common::{Eid, Error, Result};
use serde_json::Value;

fn malformed(message: &str) -> Error {
    Error::MalformedResponse { message: message.to_string() }
}

/// Walk nested objects by key, None as soon as a level is missing
fn dig<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |acc, key| acc.get(key))
}

/// Treat a value as a list: arrays yield their items, a bare object yields
/// itself, anything else yields nothing
fn as_items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Counts come back either as JSON numbers or as quoted strings
fn count_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Extract a full document record from an abstract-retrieval response
pub(crate) fn document_record(body: &Value, quota: QuotaSnapshot) -> Result<DocumentRecord> {
    let response = body
        .get("abstracts-retrieval-response")
        .ok_or_else(|| malformed("missing abstracts-retrieval-response envelope"))?;
    let coredata = response.get("coredata").ok_or_else(|| malformed("missing coredata"))?;
    let eid = coredata
        .get("eid")
        .and_then(Value::as_str)
        .map(Eid::from)
        .ok_or_else(|| malformed("coredata has no eid"))?;

    let cover_date = str_field(coredata, "prism:coverDate");
    let year = cover_date
        .as_deref()
        .and_then(|date| date.get(..4))
        .and_then(|digits| digits.parse().ok());

    let scopus_link = as_items(coredata.get("link"))
        .into_iter()
        .find(|link| link.get("@rel").and_then(Value::as_str) == Some("scopus"))
        .and_then(|link| str_field(link, "@href"));

    Ok(DocumentRecord {
        eid,
        title: str_field(coredata, "dc:title").unwrap_or_default(),
        publication_name: str_field(coredata, "prism:publicationName"),
        year,
        cover_date,
        doi: str_field(coredata, "prism:doi"),
        cited_by_count: count_field(coredata, "citedby-count"),
        authors: authors(response),
        references: references(response),
        subject_areas: subject_areas(response),
        scopus_link,
        metadata: coredata.clone(),
        quota,
    })
}

fn authors(response: &Value) -> Vec<AuthorRef> {
    as_items(dig(response, &["authors", "author"]))
        .into_iter()
        .filter_map(|author| {
            let auid = str_field(author, "@auid")?;
            let indexed_name = str_field(author, "ce:indexed-name").unwrap_or_default();
            Some(AuthorRef { auid, indexed_name })
        })
        .collect()
}

fn references(response: &Value) -> Vec<String> {
    let bibliography = dig(response, &["item", "bibrecord", "tail", "bibliography", "reference"]);
    as_items(bibliography).into_iter().filter_map(reference_id).collect()
}

/// A reference's Scopus id lives in its itemid list, tagged SGR
fn reference_id(reference: &Value) -> Option<String> {
    let itemids = as_items(dig(reference, &["ref-info", "refd-itemidlist", "itemid"]));
    itemids
        .iter()
        .find(|item| item.get("@idtype").and_then(Value::as_str) == Some("SGR"))
        .or_else(|| itemids.first())
        .and_then(|item| str_field(item, "$"))
}

fn subject_areas(response: &Value) -> Vec<SubjectArea> {
    as_items(dig(response, &["subject-areas", "subject-area"]))
        .into_iter()
        .filter_map(|subject| {
            let area = str_field(subject, "$")?;
            Some(SubjectArea {
                area,
                abbreviation: str_field(subject, "@abbrev"),
                code: str_field(subject, "@code"),
            })
        })
        .collect()
}

/// Extract one page of EIDs plus the total result count from a Scopus
/// search response
pub(crate) fn author_documents(body: &Value) -> Result<(Vec<Eid>, u64)> {
    let results = body
        .get("search-results")
        .ok_or_else(|| malformed("missing search-results envelope"))?;
    let total = count_field(results, "opensearch:totalResults").unwrap_or(0);

    let eids = as_items(results.get("entry"))
        .into_iter()
        // an empty result set is reported as a single entry with an error key
        .filter(|entry| entry.get("error").is_none())
        .filter_map(|entry| entry.get("eid").and_then(Value::as_str).map(Eid::from))
        .collect();

    Ok((eids, total))
}
