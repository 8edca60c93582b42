//! Relation records and the read-only index the expander walks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::ResearcherId;
use crate::error::Result;
use crate::layout::Direction;

/// A researcher's direct advisor and advisee links.
///
/// Both lists are ordered; the order fixes left-to-right placement in the
/// chart. Ids may point at researchers that are absent from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: ResearcherId,
    #[serde(default)]
    pub advisors: Vec<ResearcherId>,
    #[serde(default)]
    pub advisees: Vec<ResearcherId>,
}

impl Relation {
    pub fn new(
        id: u32,
        advisors: impl IntoIterator<Item = u32>,
        advisees: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            id: ResearcherId(id),
            advisors: advisors.into_iter().map(ResearcherId).collect(),
            advisees: advisees.into_iter().map(ResearcherId).collect(),
        }
    }

    /// The links followed when expanding in `direction`.
    #[inline]
    pub fn related(&self, direction: Direction) -> &[ResearcherId] {
        match direction {
            Direction::Ancestors => &self.advisors,
            Direction::Descendants => &self.advisees,
        }
    }

    /// The same relation with advisors and advisees exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            id: self.id,
            advisors: self.advisees.clone(),
            advisees: self.advisors.clone(),
        }
    }
}

/// Lookup of a researcher's relation by id.
pub trait RelationLookup {
    fn lookup(&self, id: ResearcherId) -> Option<&Relation>;
}

/// Relation records keyed by researcher id.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    relations: HashMap<ResearcherId, Relation>,
}

impl RelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from records. A later record with the same id
    /// replaces the earlier one.
    pub fn from_relations(relations: impl IntoIterator<Item = Relation>) -> Self {
        let mut index = Self::new();
        for relation in relations {
            index.insert(relation);
        }
        index
    }

    /// Parse a `relation-data.json` style array.
    pub fn from_json(json: &str) -> Result<Self> {
        let relations: Vec<Relation> = serde_json::from_str(json)?;
        Ok(Self::from_relations(relations))
    }

    /// Insert or replace a relation. Returns the replaced record.
    pub fn insert(&mut self, relation: Relation) -> Option<Relation> {
        self.relations.insert(relation.id, relation)
    }

    pub fn contains(&self, id: ResearcherId) -> bool {
        self.relations.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Iterate over all records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// The index with every relation's advisors and advisees exchanged.
    pub fn swapped(&self) -> Self {
        Self::from_relations(self.relations.values().map(Relation::swapped))
    }
}

impl RelationLookup for RelationIndex {
    #[inline]
    fn lookup(&self, id: ResearcherId) -> Option<&Relation> {
        self.relations.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_follows_direction() {
        let relation = Relation::new(8, [6, 7, 100], [9, 10, 11]);
        assert_eq!(
            relation.related(Direction::Ancestors),
            &[ResearcherId(6), ResearcherId(7), ResearcherId(100)]
        );
        assert_eq!(
            relation.related(Direction::Descendants),
            &[ResearcherId(9), ResearcherId(10), ResearcherId(11)]
        );
        let swapped = relation.swapped();
        assert_eq!(swapped.advisors, relation.advisees);
        assert_eq!(swapped.advisees, relation.advisors);
    }

    #[test]
    fn test_from_json_with_missing_lists() {
        let index = RelationIndex::from_json(
            r#"[{"id": 1, "advisors": [], "advisees": [2]}, {"id": 2, "advisors": [1]}]"#,
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        let second = index.lookup(ResearcherId(2)).unwrap();
        assert_eq!(second.advisors, vec![ResearcherId(1)]);
        assert!(second.advisees.is_empty());
        assert!(index.lookup(ResearcherId(3)).is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(RelationIndex::from_json("{not json").is_err());
    }

    #[test]
    fn test_insert_replaces() {
        let mut index = RelationIndex::new();
        assert!(index.is_empty());
        assert!(index.insert(Relation::new(1, [], [2])).is_none());
        let old = index.insert(Relation::new(1, [], [3])).unwrap();
        assert_eq!(old.advisees, vec![ResearcherId(2)]);
        assert_eq!(index.len(), 1);
        assert!(index.contains(ResearcherId(1)));
    }
}
