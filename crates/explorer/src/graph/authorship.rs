//! Authorship graph representation
//!
//! Directed bipartite graph linking document nodes to author nodes. An
//! edge document -> author denotes authorship. Every document node here is
//! also present in the citation graph; both are added during the same
//! fetch.

use citenetx_common::Eid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of the bipartite split a node sits on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BipartiteNode {
    Document,
    Author {
        /// Indexed display name
        name: String,
    },
}

/// In-memory document/author graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorshipGraph {
    /// Node side markers, keyed by EID or author id
    nodes: HashMap<String, BipartiteNode>,

    /// Adjacency list: document -> its authors
    outgoing: HashMap<String, Vec<String>>,
}

impl AuthorshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, eid: &Eid) {
        self.nodes.insert(eid.to_string(), BipartiteNode::Document);
    }

    pub fn add_author(&mut self, auid: &str, name: &str) {
        self.nodes.insert(auid.to_string(), BipartiteNode::Author { name: name.to_string() });
    }

    /// Link a document to one of its authors; repeated links are ignored
    pub fn add_authorship(&mut self, eid: &Eid, auid: &str) {
        let authors = self.outgoing.entry(eid.to_string()).or_default();
        if !authors.iter().any(|a| a == auid) {
            authors.push(auid.to_string());
        }
    }

    pub fn node(&self, id: &str) -> Option<&BipartiteNode> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Author ids linked to a document
    pub fn authors_of(&self, eid: &Eid) -> &[String] {
        self.outgoing.get(eid.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn document_count(&self) -> usize {
        self.nodes.values().filter(|n| matches!(n, BipartiteNode::Document)).count()
    }

    pub fn author_count(&self) -> usize {
        self.nodes.values().filter(|n| matches!(n, BipartiteNode::Author { .. })).count()
    }
}
