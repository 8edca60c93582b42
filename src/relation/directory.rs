//! Researcher records and free-text resolution to an id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::ResearcherId;
use crate::error::{LineageError, Result};

/// A researcher record from the dataset.
///
/// `advisors` holds advisor *names*; the id links are derived separately by
/// [`LineageGraph`](super::LineageGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    pub id: ResearcherId,
    #[serde(alias = "name", default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub advisors: Vec<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub award_date: String,
}

impl Researcher {
    /// A bare record with just an id, names and advisor names.
    pub fn named(id: u32, names: &[&str], advisors: &[&str]) -> Self {
        Self {
            id: ResearcherId(id),
            names: names.iter().map(|s| s.to_string()).collect(),
            advisors: advisors.iter().map(|s| s.to_string()).collect(),
            affiliation: None,
            title: None,
            category: None,
            keywords: Vec::new(),
            award_date: String::new(),
        }
    }

    /// First listed name, used as the display name.
    pub fn display_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// Researcher records in dataset order, addressable by id.
#[derive(Debug, Clone, Default)]
pub struct ResearcherDirectory {
    records: Vec<Researcher>,
    by_id: HashMap<ResearcherId, usize>,
}

impl ResearcherDirectory {
    pub fn new(records: Vec<Researcher>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        Self { records, by_id }
    }

    /// Parse a `data.json` style array.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Researcher> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn get(&self, id: ResearcherId) -> Option<&Researcher> {
        self.by_id.get(&id).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[Researcher] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turn a search query into a researcher id.
    ///
    /// A numeric query resolves when that id exists. Otherwise the first
    /// record with a name equal to the trimmed query (ignoring case) wins.
    pub fn resolve(&self, query: &str) -> Result<ResearcherId> {
        let query = query.trim();

        if let Ok(raw) = query.parse::<u32>() {
            let id = ResearcherId(raw);
            if self.by_id.contains_key(&id) {
                return Ok(id);
            }
        }

        let needle = query.to_lowercase();
        self.records
            .iter()
            .find(|r| r.names.iter().any(|n| n.trim().to_lowercase() == needle))
            .map(|r| r.id)
            .ok_or_else(|| LineageError::UnknownResearcher {
                query: query.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> ResearcherDirectory {
        ResearcherDirectory::new(vec![
            Researcher::named(1, &["Ada Lovelace"], &[]),
            Researcher::named(2, &["Charles Babbage", "C. Babbage"], &[]),
            Researcher::named(3, &["ada lovelace"], &["Charles Babbage"]),
        ])
    }

    #[test]
    fn test_resolve_numeric() {
        let dir = directory();
        assert_eq!(dir.resolve("2").unwrap(), ResearcherId(2));
        assert_eq!(dir.resolve(" 3 ").unwrap(), ResearcherId(3));
    }

    #[test]
    fn test_resolve_by_name_first_match() {
        let dir = directory();
        assert_eq!(dir.resolve("ADA LOVELACE").unwrap(), ResearcherId(1));
        assert_eq!(dir.resolve("c. babbage").unwrap(), ResearcherId(2));
    }

    #[test]
    fn test_resolve_unknown() {
        let dir = directory();
        let err = dir.resolve("99999").unwrap_err();
        assert!(matches!(err, LineageError::UnknownResearcher { ref query } if query == "99999"));
        assert!(dir.resolve("Grace Hopper").is_err());
    }

    #[test]
    fn test_from_json_accepts_name_alias() {
        let dir = ResearcherDirectory::from_json(
            r#"[{"id": 5, "name": ["Emmy Noether"], "advisors": ["Paul Gordan"],
                 "affiliation": "Göttingen", "title": null, "category": null,
                 "keywords": ["algebra"], "award_date": "1907"}]"#,
        )
        .unwrap();

        let emmy = dir.get(ResearcherId(5)).unwrap();
        assert_eq!(emmy.display_name(), Some("Emmy Noether"));
        assert_eq!(emmy.affiliation.as_deref(), Some("Göttingen"));
        assert_eq!(emmy.advisors, vec!["Paul Gordan".to_string()]);
        assert_eq!(dir.len(), 1);
    }
}
