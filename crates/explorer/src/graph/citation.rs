//! Citation graph representation
//!
//! Directed graph where an edge A -> B means "document A cites document B".
//! Nodes appear in two states: a stub (referenced but never fetched, empty
//! attributes) and a full node whose attributes were assigned when its
//! record was fetched.

use citenetx_common::Eid;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Attributes carried by a citation-graph node
///
/// `year` is derived from the node's record at fetch time; `flags` holds
/// whatever the caller attached to the expansion. A default-valued bag is
/// the stub state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Value>,
}

impl NodeAttrs {
    /// A node that was only ever seen as a reference
    pub fn is_stub(&self) -> bool {
        self.year.is_none() && self.flags.is_empty()
    }
}

/// In-memory citation graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationGraph {
    /// Node attributes, keyed by EID
    nodes: HashMap<Eid, NodeAttrs>,

    /// Adjacency list: eid -> documents it cites
    outgoing: HashMap<Eid, Vec<Eid>>,

    /// Reverse adjacency: eid -> documents citing it
    incoming: HashMap<Eid, Vec<Eid>>,
}

impl CitationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, creating stub nodes for unknown endpoints.
    ///
    /// Existing node attributes are never touched, and a repeated edge is
    /// ignored so in-degree counts distinct citing documents.
    pub fn add_edge(&mut self, citing: &Eid, cited: &Eid) {
        self.nodes.entry(citing.clone()).or_default();
        self.nodes.entry(cited.clone()).or_default();

        let references = self.outgoing.entry(citing.clone()).or_default();
        if references.contains(cited) {
            return;
        }
        references.push(cited.clone());
        self.incoming.entry(cited.clone()).or_default().push(citing.clone());
    }

    /// Assign a node's attribute bag, creating the node if absent.
    ///
    /// This is the fetch-time upgrade of a stub; any previous bag is
    /// replaced wholesale.
    pub fn set_attrs(&mut self, eid: &Eid, attrs: NodeAttrs) {
        self.nodes.insert(eid.clone(), attrs);
    }

    pub fn attrs(&self, eid: &Eid) -> Option<&NodeAttrs> {
        self.nodes.get(eid)
    }

    pub fn contains_node(&self, eid: &Eid) -> bool {
        self.nodes.contains_key(eid)
    }

    /// Documents cited by this one
    pub fn references(&self, eid: &Eid) -> &[Eid] {
        self.outgoing.get(eid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Documents citing this one
    pub fn cited_by(&self, eid: &Eid) -> &[Eid] {
        self.incoming.get(eid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct documents citing this one
    pub fn in_degree(&self, eid: &Eid) -> usize {
        self.incoming.get(eid).map(Vec::len).unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    /// All nodes with their attribute bags
    pub fn nodes(&self) -> impl Iterator<Item = (&Eid, &NodeAttrs)> {
        self.nodes.iter()
    }

    /// Neighbors in the undirected projection (references and citers)
    pub fn neighbors_undirected<'a>(&'a self, eid: &Eid) -> impl Iterator<Item = &'a Eid> {
        self.references(eid).iter().chain(self.cited_by(eid).iter())
    }
}
