//! Row-structured lineage forests.
//!
//! A forest is a list of levels; a level is a list of groups; a group is
//! the slots obtained by resolving one slot of the adjacent level nearer the
//! root. Adjacent levels correspond by position only: the k-th slot of one
//! level (flattened) produced the k-th group of the next level outward.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LineageError;
use crate::relation::Slot;

/// Which way the lineage is walked from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow advisors. Rows are stored farthest ancestor first.
    Ancestors,
    /// Follow advisees. Rows are stored nearest the root first.
    Descendants,
}

impl Direction {
    /// Prefix of the row labels rendered for this direction.
    pub fn row_prefix(self) -> &'static str {
        match self {
            Direction::Ancestors => "advisor",
            Direction::Descendants => "advisee",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ancestors => f.write_str("ancestors"),
            Direction::Descendants => f.write_str("descendants"),
        }
    }
}

impl FromStr for Direction {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ancestors" | "advisors" => Ok(Direction::Ancestors),
            "descendants" | "advisees" => Ok(Direction::Descendants),
            _ => Err(LineageError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Slots produced by resolving one slot of the previous level.
pub type Group = Vec<Slot>;

/// One row of the chart.
pub type Level = Vec<Group>;

/// Depth-bounded expansion of the relation graph in one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    levels: Vec<Level>,
}

impl Forest {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Slots of a level in left-to-right order, ignoring group boundaries.
    pub fn flat_level(&self, index: usize) -> impl Iterator<Item = Slot> + '_ {
        self.levels
            .get(index)
            .into_iter()
            .flatten()
            .flatten()
            .copied()
    }

    /// Total slot count of a level, sentinels included.
    pub fn level_width(&self, index: usize) -> usize {
        self.levels
            .get(index)
            .map_or(0, |level| level.iter().map(Vec::len).sum())
    }

    /// The same forest with its level order reversed.
    pub fn reversed(&self) -> Self {
        let mut levels = self.levels.clone();
        levels.reverse();
        Self { levels }
    }

    /// Levels ordered nearest-the-root first, whatever the stored order.
    pub fn root_adjacent_first(&self, direction: Direction) -> Self {
        match direction {
            Direction::Ancestors => self.reversed(),
            Direction::Descendants => self.clone(),
        }
    }

    pub fn into_levels(self) -> Vec<Level> {
        self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::ResearcherId;

    fn r(id: u32) -> Slot {
        Slot::Researcher(ResearcherId(id))
    }

    #[test]
    fn test_direction_parse_and_display() {
        assert_eq!("ancestors".parse::<Direction>().unwrap(), Direction::Ancestors);
        assert_eq!(" Descendants ".parse::<Direction>().unwrap(), Direction::Descendants);
        assert_eq!("advisees".parse::<Direction>().unwrap(), Direction::Descendants);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Ancestors.to_string(), "ancestors");
        assert_eq!(Direction::Descendants.row_prefix(), "advisee");
    }

    #[test]
    fn test_flat_level_and_width() {
        let forest = Forest::new(vec![
            vec![vec![r(6), r(7)]],
            vec![vec![r(1), r(2)], vec![Slot::Empty]],
        ]);
        assert_eq!(forest.depth(), 2);
        assert_eq!(forest.level_width(1), 3);
        assert_eq!(
            forest.flat_level(1).collect::<Vec<_>>(),
            vec![r(1), r(2), Slot::Empty]
        );
        assert_eq!(forest.level_width(5), 0);
        assert_eq!(forest.flat_level(5).count(), 0);
    }

    #[test]
    fn test_root_adjacent_first() {
        let forest = Forest::new(vec![vec![vec![r(1)]], vec![vec![r(2)]]]);
        assert_eq!(forest.root_adjacent_first(Direction::Descendants), forest);
        assert_eq!(
            forest.root_adjacent_first(Direction::Ancestors).levels()[0],
            vec![vec![r(2)]]
        );
    }
}
