//! Scopus identifier handling
//!
//! Scopus documents carry both a bare numeric id and an EID, which is the
//! same id with a fixed prefix. Graph nodes and record lookups always use
//! the EID form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns a bare Scopus id into an EID
pub const EID_PREFIX: &str = "2-s2.0-";

/// Canonical Scopus document identifier (EID)
///
/// The newtype keeps the two identifier forms apart: an `Eid` always holds
/// the prefixed form, so normalization cannot be applied twice. Construct
/// from an already-canonical string via `From`, or from a bare id via
/// [`Eid::from_scopus_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Eid(String);

impl Eid {
    /// Build an EID from a bare Scopus id by prepending the fixed prefix.
    ///
    /// No validation of the input format is performed.
    pub fn from_scopus_id(id: &str) -> Self {
        Eid(format!("{EID_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Eid {
    fn from(eid: String) -> Self {
        Eid(eid)
    }
}

impl From<&str> for Eid {
    fn from(eid: &str) -> Self {
        Eid(eid.to_string())
    }
}

impl fmt::Display for Eid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_added_once() {
        let eid = Eid::from_scopus_id("85008145641");
        assert_eq!(eid.as_str(), "2-s2.0-85008145641");
        assert_eq!(eid, Eid::from_scopus_id("85008145641"));
    }

    #[test]
    fn test_canonical_input_untouched() {
        let eid = Eid::from("2-s2.0-85008145641");
        assert_eq!(eid.as_str(), "2-s2.0-85008145641");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let eid = Eid::from_scopus_id("123");
        let json = serde_json::to_string(&eid).unwrap();
        assert_eq!(json, "\"2-s2.0-123\"");
        let back: Eid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eid);
    }
}
