//! Bottom-up column spans.
//!
//! Spans are accumulated from the level farthest from the root inward. On
//! that level each group spans its own slot count; on every other level a
//! group consumes, left to right, one span per slot from the level before it
//! and spans their sum. The result gives each node exactly the width of
//! everything hanging off it, so a fixed-column grid lines parents up over
//! their children whatever the branching factors are.

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};

use super::forest::{Direction, Forest, Level};

/// One span per group, row-parallel to the forest it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanTable {
    rows: Vec<Vec<usize>>,
}

impl SpanTable {
    pub fn new(rows: Vec<Vec<usize>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[usize]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of a row's spans.
    pub fn row_total(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, |row| row.iter().sum())
    }
}

/// Compute the span table of a forest stored in `direction`'s order.
///
/// # Errors
///
/// `MalformedForest` when a level's group lengths do not add up to the
/// number of spans on the level farther out. `row` in the error is the
/// stored row index of the offending level.
pub fn compute_spans(forest: &Forest, direction: Direction) -> Result<SpanTable> {
    // Work farthest-from-root first. Ancestors are already stored that way.
    let mut working: Vec<&Level> = forest.levels().iter().collect();
    if direction == Direction::Descendants {
        working.reverse();
    }

    let Some(outermost) = working.first() else {
        return Ok(SpanTable::default());
    };

    let mut rows: Vec<Vec<usize>> = Vec::with_capacity(working.len());
    rows.push(outermost.iter().map(Vec::len).collect());

    for (r, level) in working.iter().enumerate().skip(1) {
        let prev = &rows[r - 1];
        let consumed: usize = level.iter().map(Vec::len).sum();
        if consumed != prev.len() {
            let row = match direction {
                Direction::Ancestors => r,
                Direction::Descendants => working.len() - 1 - r,
            };
            tracing::error!(row, expected = prev.len(), actual = consumed, "malformed forest");
            return Err(LineageError::MalformedForest {
                row,
                expected: prev.len(),
                actual: consumed,
            });
        }

        let mut cursor = 0;
        let spans: Vec<usize> = level
            .iter()
            .map(|group| {
                let span: usize = prev[cursor..cursor + group.len()].iter().sum();
                cursor += group.len();
                span
            })
            .collect();
        rows.push(spans);
    }

    if direction == Direction::Descendants {
        rows.reverse();
    }

    Ok(SpanTable::new(rows))
}
