//! Connector geometry.
//!
//! Connectors are planned from the boxes the rendering surface measured
//! after laying out the rows. Nothing here draws; the output is a list of
//! line segments in container-relative coordinates.

mod geometry;
mod planner;

pub use geometry::{BoundingBox, LineSegment, flatten_segments};
pub use planner::{BoxLookup, plan_connectors};
