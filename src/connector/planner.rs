//! Connector planning between already-rendered rows.
//!
//! A synthetic root row `[[root]]` is placed ahead of the forest (ordered
//! root-adjacent first), then every pair of adjacent rows is connected: the
//! k-th node of the source row links to the k-th group of the target row.
//! Each link is drawn org-chart style as a stub off the source, a stub off
//! every target, and a horizontal bus across the target stubs. Groups that
//! are only the sentinel get no connector.

use std::collections::HashMap;

use crate::error::{LineageError, Result};
use crate::layout::{Direction, Forest, Group, LineageConfig, RowLabel};
use crate::relation::{ResearcherId, Slot};

use super::geometry::{BoundingBox, LineSegment};

/// Source of measured boxes for rendered nodes.
pub trait BoxLookup {
    /// Every box rendered for `id` on `row`, in render order.
    fn boxes(&self, id: ResearcherId, row: RowLabel) -> &[BoundingBox];
}

/// Plan the connector segments for one direction.
///
/// `forest` is in its stored order for `direction`. Coordinates are made
/// relative to `container`'s origin. A researcher appearing several times on
/// one row is matched to its boxes by occurrence: the k-th appearance uses
/// the k-th box, falling back to the first.
///
/// # Errors
///
/// `MissingBox` when a linked node has no measured box, which means the
/// surface has not finished laying out the current rows. `MalformedForest`
/// when a row's group count does not match the slot count of the row
/// before it.
pub fn plan_connectors<B: BoxLookup + ?Sized>(
    forest: &Forest,
    root: ResearcherId,
    boxes: &B,
    container: &BoundingBox,
    direction: Direction,
    config: &LineageConfig,
) -> Result<Vec<LineSegment>> {
    let mut rows: Vec<(RowLabel, Vec<Group>)> = Vec::with_capacity(forest.depth() + 1);
    rows.push((RowLabel::Root, vec![vec![Slot::Researcher(root)]]));
    for (n, level) in forest.root_adjacent_first(direction).into_levels().into_iter().enumerate() {
        rows.push((RowLabel::nth(direction, n), level));
    }

    let mut segments = Vec::new();

    for (i, pair) in rows.windows(2).enumerate() {
        let (source_label, source_level) = &pair[0];
        let (target_label, target_level) = &pair[1];

        let sources: Vec<Slot> = source_level.iter().flatten().copied().collect();
        if sources.len() != target_level.len() {
            return Err(LineageError::MalformedForest {
                row: i,
                expected: sources.len(),
                actual: target_level.len(),
            });
        }
        let targets: Vec<Slot> = target_level.iter().flatten().copied().collect();
        let source_occurrence = occurrences(&sources);
        let target_occurrence = occurrences(&targets);

        let mut offset = 0;
        for (k, (source, group)) in sources.iter().zip(target_level).enumerate() {
            let first = offset;
            offset += group.len();

            if group.iter().all(|slot| slot.is_empty()) {
                continue;
            }
            let Some(source_id) = source.id() else {
                continue;
            };

            let from = pick(boxes, source_id, *source_label, source_occurrence[k])?
                .relative_to(container);
            let to = group
                .iter()
                .enumerate()
                .filter_map(|(j, slot)| slot.id().map(|id| (first + j, id)))
                .map(|(pos, id)| {
                    pick(boxes, id, *target_label, target_occurrence[pos])
                        .map(|b| b.relative_to(container))
                })
                .collect::<Result<Vec<_>>>()?;

            emit(direction, &from, &to, config, &mut segments);
        }
    }

    tracing::debug!(%root, %direction, segments = segments.len(), "planned connectors");
    Ok(segments)
}

/// For every position, how many times the same researcher appeared earlier
/// on the row.
fn occurrences(slots: &[Slot]) -> Vec<usize> {
    let mut seen: HashMap<ResearcherId, usize> = HashMap::new();
    slots
        .iter()
        .map(|slot| match slot.id() {
            Some(id) => {
                let count = seen.entry(id).or_insert(0);
                let occurrence = *count;
                *count += 1;
                occurrence
            }
            None => 0,
        })
        .collect()
}

fn pick<B: BoxLookup + ?Sized>(
    boxes: &B,
    id: ResearcherId,
    row: RowLabel,
    occurrence: usize,
) -> Result<BoundingBox> {
    let found = boxes.boxes(id, row);
    found
        .get(occurrence)
        .or_else(|| found.first())
        .copied()
        .ok_or(LineageError::MissingBox { id, row })
}

/// Stub off the source, stubs off each target, bus across the targets.
fn emit(
    direction: Direction,
    from: &BoundingBox,
    to: &[BoundingBox],
    config: &LineageConfig,
    segments: &mut Vec<LineSegment>,
) {
    let (Some(leftmost), Some(rightmost)) = (
        to.iter().min_by(|a, b| a.center_x().total_cmp(&b.center_x())),
        to.iter().max_by(|a, b| a.center_x().total_cmp(&b.center_x())),
    ) else {
        return;
    };

    let stub = config.stub_length;
    let bus = config.bus_offset;

    match direction {
        // Source above, targets below.
        Direction::Descendants => {
            let x = from.center_x();
            segments.push(LineSegment::new(x, from.bottom(), x, from.bottom() + stub));
            for t in to {
                let x = t.center_x();
                segments.push(LineSegment::new(x, t.top(), x, t.top() - stub));
            }
            segments.push(LineSegment::new(
                leftmost.center_x(),
                leftmost.top() - bus,
                rightmost.center_x(),
                rightmost.top() - bus,
            ));
        }
        // Source below, targets above.
        Direction::Ancestors => {
            let x = from.center_x();
            segments.push(LineSegment::new(x, from.top(), x, from.top() - stub));
            for t in to {
                let x = t.center_x();
                segments.push(LineSegment::new(x, t.bottom(), x, t.bottom() + stub));
            }
            segments.push(LineSegment::new(
                leftmost.center_x(),
                leftmost.bottom() + bus,
                rightmost.center_x(),
                rightmost.bottom() + bus,
            ));
        }
    }
}
