//! Attribute queries and distances over the citation graph

use crate::graph::CitationGraph;
use citenetx_common::{Eid, Error, Result};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

/// Flag key marking nodes of the initial sample
pub const INITIAL_FLAG: &str = "initial";

/// Nodes whose flag bag carries the given key/value pair, sorted by EID
pub fn nodes_with_flag(graph: &CitationGraph, key: &str, value: &Value) -> Vec<Eid> {
    let mut selected: Vec<Eid> = graph
        .nodes()
        .filter(|(_, attrs)| attrs.flags.get(key) == Some(value))
        .map(|(eid, _)| eid.clone())
        .collect();
    selected.sort();
    selected
}

/// Nodes whose record put them in the given publication year
pub fn nodes_with_year(graph: &CitationGraph, year: i32) -> Vec<Eid> {
    let mut selected: Vec<Eid> = graph
        .nodes()
        .filter(|(_, attrs)| attrs.year == Some(year))
        .map(|(eid, _)| eid.clone())
        .collect();
    selected.sort();
    selected
}

/// Length of the shortest undirected path from `node` to the nearest node
/// flagged as part of the initial sample.
///
/// A node that is itself flagged has distance 0. Returns
/// [`Error::NodeNotFound`] when the node is absent from the graph and
/// [`Error::Unreachable`] when no flagged node can be reached.
pub fn distance_from_seed(graph: &CitationGraph, node: &Eid) -> Result<usize> {
    if !graph.contains_node(node) {
        return Err(Error::NodeNotFound { id: node.to_string() });
    }

    let seeds = nodes_with_flag(graph, INITIAL_FLAG, &Value::Bool(true));

    // breadth-first from all seeds at once; the first time `node` is seen
    // is its minimum distance to any of them
    let mut visited: HashSet<Eid> = HashSet::new();
    let mut queue: VecDeque<(Eid, usize)> = VecDeque::new();
    for seed in seeds {
        visited.insert(seed.clone());
        queue.push_back((seed, 0));
    }

    while let Some((current, distance)) = queue.pop_front() {
        if current == *node {
            return Ok(distance);
        }
        for neighbor in graph.neighbors_undirected(&current) {
            if visited.insert(neighbor.clone()) {
                queue.push_back((neighbor.clone(), distance + 1));
            }
        }
    }

    Err(Error::Unreachable { id: node.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeAttrs;
    use std::collections::BTreeMap;

    fn eid(id: &str) -> Eid {
        Eid::from_scopus_id(id)
    }

    fn seeded(id: &str, graph: &mut CitationGraph) {
        let mut flags = BTreeMap::new();
        flags.insert(INITIAL_FLAG.to_string(), Value::Bool(true));
        graph.set_attrs(&eid(id), NodeAttrs { year: None, flags });
    }

    /// seed -> a -> b, plus an isolated edge x -> y
    fn sample_graph() -> CitationGraph {
        let mut graph = CitationGraph::new();
        graph.add_edge(&eid("seed"), &eid("a"));
        graph.add_edge(&eid("a"), &eid("b"));
        graph.add_edge(&eid("x"), &eid("y"));
        seeded("seed", &mut graph);
        graph
    }

    #[test]
    fn test_seed_node_is_distance_zero() {
        let graph = sample_graph();
        assert_eq!(distance_from_seed(&graph, &eid("seed")).unwrap(), 0);
    }

    #[test]
    fn test_distance_ignores_edge_direction() {
        let graph = sample_graph();
        // b is two undirected hops away even though both edges point from
        // the seed side
        assert_eq!(distance_from_seed(&graph, &eid("b")).unwrap(), 2);
    }

    #[test]
    fn test_nearest_seed_wins() {
        let mut graph = sample_graph();
        graph.add_edge(&eid("near"), &eid("b"));
        seeded("near", &mut graph);
        assert_eq!(distance_from_seed(&graph, &eid("b")).unwrap(), 1);
    }

    #[test]
    fn test_disconnected_node_is_unreachable() {
        let graph = sample_graph();
        let err = distance_from_seed(&graph, &eid("y")).unwrap_err();
        assert!(matches!(err, Error::Unreachable { .. }));
    }

    #[test]
    fn test_absent_node_is_not_found() {
        let graph = sample_graph();
        let err = distance_from_seed(&graph, &eid("ghost")).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound { .. }));
    }

    #[test]
    fn test_nodes_with_flag_and_year() {
        let mut graph = sample_graph();
        graph.set_attrs(&eid("a"), NodeAttrs { year: Some(2018), flags: BTreeMap::new() });

        assert_eq!(nodes_with_flag(&graph, INITIAL_FLAG, &Value::Bool(true)), vec![eid("seed")]);
        assert_eq!(nodes_with_year(&graph, 2018), vec![eid("a")]);
        assert!(nodes_with_year(&graph, 1990).is_empty());
    }
}
