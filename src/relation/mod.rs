//! Researcher relations.
//!
//! This module holds the data the layout engine reads: researcher ids and
//! forest slots, the read-only relation index, the researcher directory used
//! to resolve search queries, and the petgraph-backed derivation of relation
//! records from the raw researcher dataset.

mod directory;
mod graph;
mod id;
mod index;

pub use directory::{Researcher, ResearcherDirectory};
pub use graph::LineageGraph;
pub use id::{ResearcherId, Slot};
pub use index::{Relation, RelationIndex, RelationLookup};
