//! Column placement of forest rows on a fixed-width grid.
//!
//! Each rendered row is laid out left to right with a running cursor: a
//! node occupies columns `[cursor, cursor + span)`. A node's span is the
//! span of the group hanging off it, which lives on the neighbouring row
//! farther from the root; nodes on the outermost row span one column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};
use crate::relation::{ResearcherId, Slot};

use super::forest::{Direction, Forest};
use super::span::SpanTable;

/// Identifies a rendered row.
///
/// Advisor and advisee rows are numbered from the root outward, starting at
/// zero for the row adjacent to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowLabel {
    Root,
    Advisor(usize),
    Advisee(usize),
}

impl RowLabel {
    /// Label of the `n`-th row out from the root in `direction`.
    pub fn nth(direction: Direction, n: usize) -> Self {
        match direction {
            Direction::Ancestors => RowLabel::Advisor(n),
            Direction::Descendants => RowLabel::Advisee(n),
        }
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Root => f.write_str("root"),
            RowLabel::Advisor(n) => write!(f, "advisor-{n}"),
            RowLabel::Advisee(n) => write!(f, "advisee-{n}"),
        }
    }
}

impl FromStr for RowLabel {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LineageError::InvalidRowLabel {
            label: s.to_string(),
        };

        if s == "root" {
            return Ok(RowLabel::Root);
        }
        let (prefix, n) = s.rsplit_once('-').ok_or_else(invalid)?;
        let n: usize = n.parse().map_err(|_| invalid())?;
        match prefix {
            "advisor" => Ok(RowLabel::Advisor(n)),
            "advisee" => Ok(RowLabel::Advisee(n)),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for RowLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RowLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A node placed on the grid. Columns are zero-based, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub slot: Slot,
    pub start: usize,
    pub end: usize,
}

impl Cell {
    pub fn span(&self) -> usize {
        self.end - self.start
    }
}

/// All cells of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPlacement {
    pub label: RowLabel,
    pub cells: Vec<Cell>,
}

/// The root's row: a single cell across the whole grid.
pub fn root_placement(root: ResearcherId, columns: usize) -> RowPlacement {
    RowPlacement {
        label: RowLabel::Root,
        cells: vec![Cell {
            slot: Slot::Researcher(root),
            start: 0,
            end: columns.max(1),
        }],
    }
}

/// Place every row of a forest, in stored order.
///
/// Rows holding only sentinels are skipped; sentinels inside a rendered row
/// keep their cell so the nodes to their right stay in their columns.
///
/// # Errors
///
/// `MalformedForest` when `spans` does not match the forest's shape.
pub fn place_rows(forest: &Forest, spans: &SpanTable, direction: Direction) -> Result<Vec<RowPlacement>> {
    let depth = forest.depth();
    if spans.len() != depth {
        return Err(LineageError::MalformedForest {
            row: 0,
            expected: depth,
            actual: spans.len(),
        });
    }

    let mut placements = Vec::with_capacity(depth);
    for row in 0..depth {
        let slots: Vec<Slot> = forest.flat_level(row).collect();
        if slots.iter().all(|slot| slot.is_empty()) {
            continue;
        }

        // Spans of the groups hanging off this row's nodes, if any.
        let outer = match direction {
            Direction::Ancestors => row.checked_sub(1),
            Direction::Descendants => Some(row + 1).filter(|&r| r < depth),
        };
        let node_spans = match outer.and_then(|r| spans.row(r)) {
            Some(outer_spans) if outer_spans.len() == slots.len() => outer_spans.to_vec(),
            Some(outer_spans) => {
                return Err(LineageError::MalformedForest {
                    row,
                    expected: slots.len(),
                    actual: outer_spans.len(),
                });
            }
            None => vec![1; slots.len()],
        };

        let mut cursor = 0;
        let cells = slots
            .into_iter()
            .zip(node_spans)
            .map(|(slot, span)| {
                let cell = Cell {
                    slot,
                    start: cursor,
                    end: cursor + span,
                };
                cursor += span;
                cell
            })
            .collect();

        let n = match direction {
            Direction::Ancestors => depth - 1 - row,
            Direction::Descendants => row,
        };
        placements.push(RowPlacement {
            label: RowLabel::nth(direction, n),
            cells,
        });
    }

    Ok(placements)
}
