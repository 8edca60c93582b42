//! Researcher identifiers and forest slots.
//!
//! Every position in a lineage forest is a [`Slot`]: either a researcher or
//! the empty sentinel that keeps sibling branches column-aligned when a
//! researcher has no further advisors/advisees.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable researcher identifier.
///
/// Wraps the dataset's numeric id. It is a plain u32 for cheap copies and
/// WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResearcherId(pub u32);

impl ResearcherId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ResearcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ResearcherId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ResearcherId> for u32 {
    #[inline]
    fn from(id: ResearcherId) -> Self {
        id.0
    }
}

/// One position in a forest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Researcher(ResearcherId),
    /// No relation at this position.
    Empty,
}

impl Slot {
    /// The researcher at this slot, if any.
    #[inline]
    pub fn id(self) -> Option<ResearcherId> {
        match self {
            Slot::Researcher(id) => Some(id),
            Slot::Empty => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }
}

impl From<ResearcherId> for Slot {
    #[inline]
    fn from(id: ResearcherId) -> Self {
        Slot::Researcher(id)
    }
}

// Serialized as the id number, or null for the sentinel.
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Researcher(id) => serializer.serialize_u32(id.0),
            Slot::Empty => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<u32>::deserialize(deserializer)?
            .map_or(Slot::Empty, |id| Slot::Researcher(ResearcherId(id))))
    }
}
