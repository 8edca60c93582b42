//! Tunables shared by the layout and connector stages.

use serde::{Deserialize, Serialize};

/// Configuration for a lineage chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineageConfig {
    /// Length of the vertical stubs leaving each node.
    pub stub_length: f32,
    /// Distance from the target nodes' edge to the horizontal bus.
    pub bus_offset: f32,
    /// Depth used when a search does not name one.
    pub default_depth: usize,
    /// Deepest expansion a search may request.
    pub max_depth: usize,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            stub_length: 8.0,
            bus_offset: 9.0,
            default_depth: 2,
            max_depth: 3,
        }
    }
}

impl LineageConfig {
    /// Whether `depth` is a depth a search may request.
    pub fn accepts_depth(&self, depth: usize) -> bool {
        (1..=self.max_depth).contains(&depth)
    }
}
