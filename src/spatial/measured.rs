//! Boxes measured by the rendering surface after a layout pass.

use std::collections::HashMap;

use crate::connector::{BoundingBox, BoxLookup};
use crate::layout::RowLabel;
use crate::relation::ResearcherId;

use super::rtree::BoxIndex;

/// Measured node boxes for the current chart, plus the container they were
/// measured in.
///
/// Boxes for the same researcher on the same row are kept in the order they
/// were recorded, which must be render order.
#[derive(Default)]
pub struct MeasuredLayout {
    boxes: HashMap<(RowLabel, ResearcherId), Vec<BoundingBox>>,
    index: BoxIndex,
    container: BoundingBox,
}

impl MeasuredLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the box of one rendered node.
    pub fn record(&mut self, id: ResearcherId, row: RowLabel, bounds: BoundingBox) {
        self.boxes.entry((row, id)).or_default().push(bounds);
        self.index.insert(id, row, bounds);
    }

    pub fn set_container(&mut self, container: BoundingBox) {
        self.container = container;
    }

    /// The container's box, in the same space as the recorded boxes.
    pub fn container(&self) -> &BoundingBox {
        &self.container
    }

    /// Drop every recorded box. The container is kept.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.index.clear();
    }

    /// Number of recorded boxes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The rendered node under a point, in the recorded boxes' space.
    pub fn node_at(&self, x: f32, y: f32) -> Option<(ResearcherId, RowLabel)> {
        self.index.at(x, y).map(|node| (node.id, node.row))
    }
}

impl BoxLookup for MeasuredLayout {
    fn boxes(&self, id: ResearcherId, row: RowLabel) -> &[BoundingBox] {
        self.boxes.get(&(row, id)).map_or(&[][..], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_render_order() {
        let mut measured = MeasuredLayout::new();
        let first = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let second = BoundingBox::new(20.0, 0.0, 10.0, 10.0);
        measured.record(ResearcherId(30), RowLabel::Advisor(1), first);
        measured.record(ResearcherId(30), RowLabel::Advisor(1), second);

        assert_eq!(measured.boxes(ResearcherId(30), RowLabel::Advisor(1)), &[first, second]);
        assert!(measured.boxes(ResearcherId(30), RowLabel::Advisor(0)).is_empty());
        assert_eq!(measured.len(), 2);
    }

    #[test]
    fn test_node_at_and_clear() {
        let mut measured = MeasuredLayout::new();
        measured.set_container(BoundingBox::new(5.0, 5.0, 500.0, 500.0));
        measured.record(ResearcherId(8), RowLabel::Root, BoundingBox::new(10.0, 10.0, 50.0, 20.0));

        assert_eq!(measured.node_at(30.0, 20.0), Some((ResearcherId(8), RowLabel::Root)));
        assert_eq!(measured.node_at(0.0, 0.0), None);

        measured.clear();
        assert!(measured.is_empty());
        assert_eq!(measured.node_at(30.0, 20.0), None);
        assert_eq!(measured.container().x, 5.0);
    }
}
