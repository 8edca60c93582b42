//! R-tree over rendered node boxes using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Node under a point
//! - Nearest node within a distance

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::connector::BoundingBox;
use crate::layout::RowLabel;
use crate::relation::ResearcherId;

/// A rendered node box in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub id: ResearcherId,
    pub row: RowLabel,
    pub bounds: BoundingBox,
    /// Insertion order, used to break ties between overlapping boxes.
    seq: u32,
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x, self.bounds.y],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let b = &self.bounds;
        let dx = (b.x - point[0]).max(0.0).max(point[0] - b.right());
        let dy = (b.y - point[1]).max(0.0).max(point[1] - b.bottom());
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.bounds.contains(point[0], point[1])
    }
}

/// Spatial index for rendered node boxes.
pub struct BoxIndex {
    tree: RTree<NodeBox>,
    next_seq: u32,
}

impl BoxIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            next_seq: 0,
        }
    }

    /// Insert a node box.
    pub fn insert(&mut self, id: ResearcherId, row: RowLabel, bounds: BoundingBox) {
        self.tree.insert(NodeBox {
            id,
            row,
            bounds,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// The node whose box contains the point. When boxes overlap the
    /// earliest inserted wins.
    pub fn at(&self, x: f32, y: f32) -> Option<&NodeBox> {
        self.tree
            .locate_all_at_point(&[x, y])
            .min_by_key(|node| node.seq)
    }

    /// Find the nearest node within a maximum distance of its box edge.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<&NodeBox> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|node| node.distance_2(&[x, y]) <= max_distance_sq)
    }

    /// Get the number of boxes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Clear all boxes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.next_seq = 0;
    }
}

impl Default for BoxIndex {
    fn default() -> Self {
        Self::new()
    }
}
