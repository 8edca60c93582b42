//! Spatial indexing of rendered node boxes.
//!
//! The rendering surface reports where it placed each node; this module
//! keeps those boxes for connector planning and answers pointer hit tests
//! through an R-tree.

mod measured;
mod rtree;

pub use measured::MeasuredLayout;
pub use rtree::{BoxIndex, NodeBox};
