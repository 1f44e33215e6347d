//! CiteNetX Explorer
//!
//! Pulls bibliographic records from a remote source and manages the data
//! pulled: a deduplicated record store, a citation graph, a bipartite
//! authorship graph, and checkpoints of all three. The heart of the crate
//! is [`session::ExplorerSession`], the bounded recursive expansion engine.

pub mod checkpoint;
pub mod graph;
pub mod query;
pub mod quota;
pub mod reports;
pub mod session;
pub mod store;

pub use checkpoint::{CheckpointBundle, CheckpointManager};
pub use graph::{AuthorshipGraph, BipartiteNode, CitationGraph, NodeAttrs};
pub use quota::QuotaTracker;
pub use session::{ExplorerSession, FlagMap, MIN_INDEGREE_TO_EXPAND};
pub use store::RecordStore;
