//! Bounded-depth expansion of a root researcher into a lineage forest.
//!
//! Level 0 is the root's own advisors (or advisees). Every slot of level `i`
//! is resolved against the relation index and contributes exactly one group
//! to level `i + 1`; slots with nothing to resolve contribute `[Empty]` so
//! sibling branches keep their columns. Ids reached along several paths are
//! expanded once per path, never merged.

use crate::error::{LineageError, Result};
use crate::relation::{RelationLookup, ResearcherId, Slot};

use super::forest::{Direction, Forest, Group, Level};

/// Output of [`expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The forest, in stored order for its direction.
    pub forest: Forest,
    /// Widest level in slots; the column count of the rendering grid.
    pub max_row_width: usize,
}

/// Expand `root` outward for `max_depth` levels.
///
/// # Errors
///
/// `NotFound` when the root is not in the index, `InvalidDepth` when
/// `max_depth` is zero.
pub fn expand<L: RelationLookup + ?Sized>(
    root: ResearcherId,
    max_depth: usize,
    direction: Direction,
    index: &L,
) -> Result<Expansion> {
    let Some(root_relation) = index.lookup(root) else {
        tracing::warn!(%root, %direction, "expansion root not found");
        return Err(LineageError::NotFound { id: root });
    };
    if max_depth == 0 {
        return Err(LineageError::InvalidDepth { depth: max_depth });
    }

    let mut levels: Vec<Level> = Vec::with_capacity(max_depth);
    levels.push(vec![to_group(root_relation.related(direction))]);
    let mut max_row_width = levels[0][0].len();

    for i in 0..max_depth - 1 {
        let next: Level = levels[i]
            .iter()
            .flatten()
            .map(|&slot| resolve(slot, direction, index))
            .collect();

        let width: usize = next.iter().map(Vec::len).sum();
        max_row_width = max_row_width.max(width);
        levels.push(next);
    }

    if direction == Direction::Ancestors {
        levels.reverse();
    }

    tracing::debug!(
        %root,
        %direction,
        depth = levels.len(),
        max_row_width,
        "expanded lineage forest"
    );

    Ok(Expansion {
        forest: Forest::new(levels),
        max_row_width,
    })
}

/// Resolve one slot into the group it contributes to the next level.
fn resolve<L: RelationLookup + ?Sized>(slot: Slot, direction: Direction, index: &L) -> Group {
    let related = slot
        .id()
        .and_then(|id| index.lookup(id))
        .map_or(&[][..], |relation| relation.related(direction));
    to_group(related)
}

fn to_group(ids: &[ResearcherId]) -> Group {
    if ids.is_empty() {
        vec![Slot::Empty]
    } else {
        ids.iter().copied().map(Slot::Researcher).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{Relation, RelationIndex};

    fn r(id: u32) -> Slot {
        Slot::Researcher(ResearcherId(id))
    }

    /// Root 8 with advisors 6, 7, 100 and advisees 9, 10, 11.
    fn sample_index() -> RelationIndex {
        RelationIndex::from_relations([
            Relation::new(1, [], [6]),
            Relation::new(2, [], [6]),
            Relation::new(3, [], [6]),
            Relation::new(4, [], [6]),
            Relation::new(5, [], [7]),
            Relation::new(6, [1, 2, 3, 4], [8]),
            Relation::new(7, [5], [8]),
            Relation::new(8, [6, 7, 100], [9, 10, 11]),
            Relation::new(9, [8, 500], [12, 13, 14]),
            Relation::new(10, [8, 500], []),
            Relation::new(11, [8], [15, 16]),
            Relation::new(100, [], [8]),
            Relation::new(500, [499], [9, 10]),
        ])
    }

    #[test]
    fn test_ancestors_depth_two() {
        let expansion = expand(ResearcherId(8), 2, Direction::Ancestors, &sample_index()).unwrap();

        assert_eq!(
            expansion.forest.levels(),
            &[
                vec![vec![r(1), r(2), r(3), r(4)], vec![r(5)], vec![Slot::Empty]],
                vec![vec![r(6), r(7), r(100)]],
            ]
        );
        assert_eq!(expansion.max_row_width, 6);
    }

    #[test]
    fn test_descendants_depth_two() {
        let expansion =
            expand(ResearcherId(8), 2, Direction::Descendants, &sample_index()).unwrap();

        assert_eq!(
            expansion.forest.levels(),
            &[
                vec![vec![r(9), r(10), r(11)]],
                vec![vec![r(12), r(13), r(14)], vec![Slot::Empty], vec![r(15), r(16)]],
            ]
        );
        assert_eq!(expansion.max_row_width, 6);
    }

    #[test]
    fn test_depth_one_is_direct_relations() {
        let expansion = expand(ResearcherId(8), 1, Direction::Ancestors, &sample_index()).unwrap();
        assert_eq!(expansion.forest.levels(), &[vec![vec![r(6), r(7), r(100)]]]);
        assert_eq!(expansion.max_row_width, 3);
    }

    #[test]
    fn test_root_without_relations_yields_sentinel() {
        let expansion = expand(ResearcherId(1), 1, Direction::Ancestors, &sample_index()).unwrap();
        assert_eq!(expansion.forest.levels(), &[vec![vec![Slot::Empty]]]);
        assert_eq!(expansion.max_row_width, 1);
    }

    #[test]
    fn test_sentinels_propagate_one_group_each() {
        let expansion = expand(ResearcherId(8), 3, Direction::Descendants, &sample_index()).unwrap();
        let forest = &expansion.forest;

        assert_eq!(forest.depth(), 3);
        // 12..16 have no entries; 10's sentinel resolves to another sentinel.
        assert_eq!(forest.levels()[2], vec![vec![Slot::Empty]; 6]);
        for i in 0..forest.depth() - 1 {
            assert_eq!(forest.levels()[i + 1].len(), forest.level_width(i));
        }
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let err = expand(ResearcherId(99999), 2, Direction::Ancestors, &sample_index()).unwrap_err();
        assert!(matches!(err, LineageError::NotFound { id } if id == ResearcherId(99999)));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = expand(ResearcherId(8), 0, Direction::Descendants, &sample_index()).unwrap_err();
        assert!(matches!(err, LineageError::InvalidDepth { depth: 0 }));
    }

    #[test]
    fn test_shared_ancestor_is_duplicated_per_path() {
        // 20 and 21 share grand-advisor 30 through distinct advisors.
        let index = RelationIndex::from_relations([
            Relation::new(1, [20, 21], []),
            Relation::new(20, [30], [1]),
            Relation::new(21, [30], [1]),
            Relation::new(30, [], [20, 21]),
        ]);
        let expansion = expand(ResearcherId(1), 2, Direction::Ancestors, &index).unwrap();

        assert_eq!(expansion.forest.levels()[0], vec![vec![r(30)], vec![r(30)]]);
    }

    #[test]
    fn test_direction_symmetry() {
        let index = sample_index();
        let swapped = index.swapped();
        for root in [8, 9, 6, 500] {
            for depth in 1..=4 {
                let up = expand(ResearcherId(root), depth, Direction::Ancestors, &index).unwrap();
                let down =
                    expand(ResearcherId(root), depth, Direction::Descendants, &swapped).unwrap();
                assert_eq!(up.forest.reversed(), down.forest, "root {root} depth {depth}");
                assert_eq!(up.max_row_width, down.max_row_width);
            }
        }
    }
}
