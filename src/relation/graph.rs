//! LineageGraph - advisor/advisee topology derived from researcher records.
//!
//! The dataset stores advisors by *name*. This module resolves those names
//! into id links, keeps them in a petgraph StableGraph (advisor → advisee),
//! and flattens the result into a [`RelationIndex`] for the expander.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction as EdgeDirection};
use std::collections::HashMap;

use super::directory::Researcher;
use super::id::ResearcherId;
use super::index::{Relation, RelationIndex};

/// Ordering of one advisor → advisee link on both of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    /// Position among the advisee's advisors.
    advisor_rank: u32,
    /// Position among the advisor's advisees.
    advisee_rank: u32,
}

/// Directed lineage graph, edges point from advisor to advisee.
pub struct LineageGraph {
    graph: StableGraph<ResearcherId, Link, Directed>,

    /// Map from researcher id to petgraph NodeIndex
    id_to_index: HashMap<ResearcherId, NodeIndex>,

    /// Researchers in insertion order
    order: Vec<ResearcherId>,
}

impl LineageGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            id_to_index: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Derive links from researcher records by exact name matching.
    ///
    /// A researcher's advisors are, for each advisor name in order, every
    /// record (in dataset order) listing that name. Its advisees are, for
    /// each of its own names, every record naming it as an advisor.
    pub fn from_researchers(records: &[Researcher]) -> Self {
        let mut lineage = Self::new();
        for record in records {
            lineage.add_researcher(record.id);
        }

        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut by_advisor_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            for name in &record.names {
                by_name.entry(name.as_str()).or_default().push(i);
            }
            for name in &record.advisors {
                by_advisor_name.entry(name.as_str()).or_default().push(i);
            }
        }

        // (advisor record, advisee record) -> ranks
        let mut links: HashMap<(usize, usize), Link> = HashMap::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();

        for (advisee, record) in records.iter().enumerate() {
            let mut rank = 0;
            for name in &record.advisors {
                for &advisor in by_name.get(name.as_str()).into_iter().flatten() {
                    if advisor == advisee || links.contains_key(&(advisor, advisee)) {
                        continue;
                    }
                    links.insert(
                        (advisor, advisee),
                        Link {
                            advisor_rank: rank,
                            advisee_rank: 0,
                        },
                    );
                    pairs.push((advisor, advisee));
                    rank += 1;
                }
            }
        }

        for (advisor, record) in records.iter().enumerate() {
            let mut rank = 0;
            let mut seen: Vec<usize> = Vec::new();
            for name in &record.names {
                for &advisee in by_advisor_name.get(name.as_str()).into_iter().flatten() {
                    if seen.contains(&advisee) {
                        continue;
                    }
                    if let Some(link) = links.get_mut(&(advisor, advisee)) {
                        link.advisee_rank = rank;
                        seen.push(advisee);
                        rank += 1;
                    }
                }
            }
        }

        for (advisor, advisee) in pairs {
            let link = links[&(advisor, advisee)];
            lineage.insert_link(records[advisor].id, records[advisee].id, link);
        }

        tracing::debug!(
            researchers = lineage.node_count(),
            links = lineage.link_count(),
            "derived lineage graph from researcher records"
        );
        lineage
    }

    /// Add a researcher. Returns false if it was already present.
    pub fn add_researcher(&mut self, id: ResearcherId) -> bool {
        if self.id_to_index.contains_key(&id) {
            return false;
        }
        let index = self.graph.add_node(id);
        self.id_to_index.insert(id, index);
        self.order.push(id);
        true
    }

    /// Append a link at the end of both endpoints' lists.
    ///
    /// Returns false for unknown researchers, self-links and duplicates.
    pub fn add_link(&mut self, advisor: ResearcherId, advisee: ResearcherId) -> bool {
        let (Some(&from), Some(&to)) = (self.id_to_index.get(&advisor), self.id_to_index.get(&advisee))
        else {
            return false;
        };
        if from == to || self.graph.find_edge(from, to).is_some() {
            return false;
        }

        let link = Link {
            advisor_rank: self.graph.edges_directed(to, EdgeDirection::Incoming).count() as u32,
            advisee_rank: self.graph.edges_directed(from, EdgeDirection::Outgoing).count() as u32,
        };
        self.graph.add_edge(from, to, link);
        true
    }

    fn insert_link(&mut self, advisor: ResearcherId, advisee: ResearcherId, link: Link) {
        if let (Some(&from), Some(&to)) = (self.id_to_index.get(&advisor), self.id_to_index.get(&advisee)) {
            self.graph.add_edge(from, to, link);
        }
    }

    /// Get the number of researchers.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of advisor → advisee links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Advisors of a researcher, in rank order.
    pub fn advisors(&self, id: ResearcherId) -> Vec<ResearcherId> {
        self.neighbors_ranked(id, EdgeDirection::Incoming)
    }

    /// Advisees of a researcher, in rank order.
    pub fn advisees(&self, id: ResearcherId) -> Vec<ResearcherId> {
        self.neighbors_ranked(id, EdgeDirection::Outgoing)
    }

    fn neighbors_ranked(&self, id: ResearcherId, dir: EdgeDirection) -> Vec<ResearcherId> {
        let Some(&index) = self.id_to_index.get(&id) else {
            return Vec::new();
        };

        let mut ranked: Vec<(u32, ResearcherId)> = self
            .graph
            .edges_directed(index, dir)
            .filter_map(|edge| {
                let (rank, other) = match dir {
                    EdgeDirection::Incoming => (edge.weight().advisor_rank, edge.source()),
                    EdgeDirection::Outgoing => (edge.weight().advisee_rank, edge.target()),
                };
                self.graph.node_weight(other).map(|&other_id| (rank, other_id))
            })
            .collect();
        ranked.sort_by_key(|&(rank, _)| rank);
        ranked.into_iter().map(|(_, id)| id).collect()
    }

    /// Flatten into relation records, one per researcher.
    pub fn to_index(&self) -> RelationIndex {
        RelationIndex::from_relations(self.order.iter().map(|&id| Relation {
            id,
            advisors: self.advisors(id),
            advisees: self.advisees(id),
        }))
    }
}

impl Default for LineageGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::RelationLookup;

    fn ids(raw: &[u32]) -> Vec<ResearcherId> {
        raw.iter().copied().map(ResearcherId).collect()
    }

    #[test]
    fn test_from_researchers_matches_names() {
        let records = vec![
            Researcher::named(1, &["Gauss"], &[]),
            Researcher::named(2, &["Bessel"], &["Gauss"]),
            Researcher::named(3, &["Dedekind"], &["Gauss"]),
            Researcher::named(4, &["Riemann"], &["Gauss", "Dirichlet"]),
            Researcher::named(5, &["Dirichlet"], &[]),
        ];
        let lineage = LineageGraph::from_researchers(&records);

        assert_eq!(lineage.node_count(), 5);
        assert_eq!(lineage.link_count(), 4);
        assert_eq!(lineage.advisees(ResearcherId(1)), ids(&[2, 3, 4]));
        // Advisor order follows the advisee's own list, not record order.
        assert_eq!(lineage.advisors(ResearcherId(4)), ids(&[1, 5]));
        assert_eq!(lineage.advisees(ResearcherId(5)), ids(&[4]));
        assert!(lineage.advisors(ResearcherId(1)).is_empty());
    }

    #[test]
    fn test_advisor_order_follows_advisor_names() {
        let records = vec![
            Researcher::named(1, &["A"], &[]),
            Researcher::named(2, &["B"], &[]),
            Researcher::named(3, &["C"], &["B", "A"]),
        ];
        let lineage = LineageGraph::from_researchers(&records);
        assert_eq!(lineage.advisors(ResearcherId(3)), ids(&[2, 1]));
    }

    #[test]
    fn test_aliases_do_not_duplicate_links() {
        let records = vec![
            Researcher::named(1, &["Hilbert", "D. Hilbert"], &[]),
            Researcher::named(2, &["Weyl"], &["Hilbert", "D. Hilbert"]),
        ];
        let lineage = LineageGraph::from_researchers(&records);
        assert_eq!(lineage.link_count(), 1);
        assert_eq!(lineage.advisors(ResearcherId(2)), ids(&[1]));
        assert_eq!(lineage.advisees(ResearcherId(1)), ids(&[2]));
    }

    #[test]
    fn test_self_link_skipped() {
        let records = vec![Researcher::named(1, &["Narcissus"], &["Narcissus"])];
        let lineage = LineageGraph::from_researchers(&records);
        assert_eq!(lineage.link_count(), 0);
    }

    #[test]
    fn test_add_link_appends_and_rejects_duplicates() {
        let mut lineage = LineageGraph::new();
        for id in 1..=3 {
            assert!(lineage.add_researcher(ResearcherId(id)));
        }
        assert!(!lineage.add_researcher(ResearcherId(1)));

        assert!(lineage.add_link(ResearcherId(1), ResearcherId(3)));
        assert!(lineage.add_link(ResearcherId(2), ResearcherId(3)));
        assert!(!lineage.add_link(ResearcherId(1), ResearcherId(3)));
        assert!(!lineage.add_link(ResearcherId(1), ResearcherId(1)));
        assert!(!lineage.add_link(ResearcherId(1), ResearcherId(99)));

        assert_eq!(lineage.advisors(ResearcherId(3)), ids(&[1, 2]));
    }

    #[test]
    fn test_to_index() {
        let records = vec![
            Researcher::named(10, &["X"], &[]),
            Researcher::named(11, &["Y"], &["X"]),
        ];
        let index = LineageGraph::from_researchers(&records).to_index();

        assert_eq!(index.len(), 2);
        let x = index.lookup(ResearcherId(10)).unwrap();
        assert!(x.advisors.is_empty());
        assert_eq!(x.advisees, ids(&[11]));
        let y = index.lookup(ResearcherId(11)).unwrap();
        assert_eq!(y.advisors, ids(&[10]));
    }
}
