//! CiteNetX Retrieval
//!
//! The remote record-retrieval collaborator: the [`DocumentSource`] contract
//! the expansion engine crawls through, the Scopus-backed implementation,
//! and an in-memory mock for tests.

pub mod scopus;
pub mod source;

pub use scopus::ScopusClient;
pub use source::{DocumentSource, MockSource};
