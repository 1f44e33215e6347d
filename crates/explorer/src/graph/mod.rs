//! Graph structures accumulated during expansion

mod authorship;
mod citation;

pub use authorship::{AuthorshipGraph, BipartiteNode};
pub use citation::{CitationGraph, NodeAttrs};
