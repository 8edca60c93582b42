//! Both halves of a lineage chart for one query.

use serde::Serialize;

use crate::connector::{BoundingBox, BoxLookup, LineSegment, plan_connectors};
use crate::error::Result;
use crate::layout::{
    Direction, Forest, LineageConfig, RowPlacement, SpanTable, compute_spans, expand, place_rows,
    root_placement,
};
use crate::relation::{RelationLookup, ResearcherId};

/// Forest, spans and grid placement for one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalLayout {
    pub direction: Direction,
    pub forest: Forest,
    pub spans: SpanTable,
    /// Column count of this half's grid.
    pub max_row_width: usize,
    /// Rendered rows, in stored order.
    pub rows: Vec<RowPlacement>,
}

impl DirectionalLayout {
    /// Expand, size and place one direction.
    pub fn build<L: RelationLookup + ?Sized>(
        root: ResearcherId,
        depth: usize,
        direction: Direction,
        index: &L,
    ) -> Result<Self> {
        let expansion = expand(root, depth, direction, index)?;
        let spans = compute_spans(&expansion.forest, direction)?;
        let rows = place_rows(&expansion.forest, &spans, direction)?;
        Ok(Self {
            direction,
            forest: expansion.forest,
            spans,
            max_row_width: expansion.max_row_width,
            rows,
        })
    }

    /// Connector segments for this half, from measured boxes.
    pub fn plan_connectors<B: BoxLookup + ?Sized>(
        &self,
        root: ResearcherId,
        boxes: &B,
        container: &BoundingBox,
        config: &LineageConfig,
    ) -> Result<Vec<LineSegment>> {
        plan_connectors(&self.forest, root, boxes, container, self.direction, config)
    }
}

/// A complete chart: ancestors above the root, descendants below.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageView {
    pub root: ResearcherId,
    pub depth: usize,
    /// The root's own row, spanning the ancestor grid.
    pub root_row: RowPlacement,
    pub ancestors: DirectionalLayout,
    pub descendants: DirectionalLayout,
}

impl LineageView {
    /// Build both directions. Fails as a whole if either does.
    pub fn build<L: RelationLookup + ?Sized>(root: ResearcherId, depth: usize, index: &L) -> Result<Self> {
        let ancestors = DirectionalLayout::build(root, depth, Direction::Ancestors, index)?;
        let descendants = DirectionalLayout::build(root, depth, Direction::Descendants, index)?;
        Ok(Self {
            root,
            depth,
            root_row: root_placement(root, ancestors.max_row_width),
            ancestors,
            descendants,
        })
    }

    pub fn layout(&self, direction: Direction) -> &DirectionalLayout {
        match direction {
            Direction::Ancestors => &self.ancestors,
            Direction::Descendants => &self.descendants,
        }
    }

    /// Connector segments for one half of the chart.
    pub fn plan_connectors<B: BoxLookup + ?Sized>(
        &self,
        direction: Direction,
        boxes: &B,
        container: &BoundingBox,
        config: &LineageConfig,
    ) -> Result<Vec<LineSegment>> {
        self.layout(direction)
            .plan_connectors(self.root, boxes, container, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineageError;
    use crate::relation::{Relation, RelationIndex};

    fn index() -> RelationIndex {
        RelationIndex::from_relations([
            Relation::new(6, [1, 2], [8]),
            Relation::new(8, [6, 7], [9]),
            Relation::new(9, [8], []),
        ])
    }

    #[test]
    fn test_build_both_directions() {
        let view = LineageView::build(ResearcherId(8), 2, &index()).unwrap();

        assert_eq!(view.ancestors.forest.depth(), 2);
        assert_eq!(view.ancestors.max_row_width, 3);
        assert_eq!(view.ancestors.spans.rows(), &[vec![2, 1], vec![3]]);
        assert_eq!(view.root_row.cells[0].end, 3);

        // 9 has no advisees, so the descendants' outer row is all sentinel.
        assert_eq!(view.descendants.rows.len(), 1);
        assert_eq!(view.layout(Direction::Descendants).max_row_width, 1);
    }

    #[test]
    fn test_missing_root_fails_whole_view() {
        let err = LineageView::build(ResearcherId(99999), 2, &index()).unwrap_err();
        assert!(matches!(err, LineageError::NotFound { .. }));
    }

    #[test]
    fn test_serializes_for_js() {
        let view = LineageView::build(ResearcherId(8), 1, &index()).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["root"], 8);
        assert_eq!(json["ancestors"]["direction"], "ancestors");
        assert_eq!(json["ancestors"]["maxRowWidth"], 2);
        assert_eq!(json["ancestors"]["forest"], serde_json::json!([[[6, 7]]]));
        assert_eq!(json["descendants"]["rows"][0]["label"], "advisee-0");
    }
}
