//! LineageEngine - per-session state behind the JS bindings.
//!
//! The layout functions themselves are stateless. The engine keeps what a
//! chart session accumulates between calls: the loaded dataset, the view of
//! the last successful search, and the boxes the page measured for it.

use crate::connector::{BoundingBox, LineSegment};
use crate::error::{LineageError, Result};
use crate::layout::{Direction, LineageConfig, RowLabel};
use crate::relation::{
    LineageGraph, RelationIndex, Researcher, ResearcherDirectory, ResearcherId,
};
use crate::spatial::MeasuredLayout;
use crate::view::LineageView;

/// The lineage chart engine.
#[derive(Default)]
pub struct LineageEngine {
    config: LineageConfig,
    relations: RelationIndex,
    directory: ResearcherDirectory,
    view: Option<LineageView>,
    measured: MeasuredLayout,
}

impl LineageEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LineageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    // =========================================================================
    // Dataset
    // =========================================================================

    /// Replace the relation index.
    pub fn load_relations(&mut self, relations: RelationIndex) {
        self.relations = relations;
    }

    /// Replace the researcher directory.
    ///
    /// When `derive_relations` is set the relation index is rebuilt from the
    /// records' advisor names as well.
    pub fn load_researchers(&mut self, records: Vec<Researcher>, derive_relations: bool) {
        if derive_relations {
            self.relations = LineageGraph::from_researchers(&records).to_index();
        }
        self.directory = ResearcherDirectory::new(records);
    }

    pub fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    pub fn researcher(&self, id: ResearcherId) -> Option<&Researcher> {
        self.directory.get(id)
    }

    /// Resolve a search query against the directory, falling back to a bare
    /// numeric id known to the relation index.
    pub fn resolve(&self, query: &str) -> Result<ResearcherId> {
        match self.directory.resolve(query) {
            Ok(id) => Ok(id),
            Err(err) => query
                .trim()
                .parse::<u32>()
                .ok()
                .map(ResearcherId)
                .filter(|&id| self.relations.contains(id))
                .ok_or(err),
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Build the chart for `root`. `None` uses the configured default depth.
    ///
    /// On error the previous view and its measurements are left untouched.
    pub fn search(&mut self, root: ResearcherId, depth: Option<usize>) -> Result<&LineageView> {
        let depth = depth.unwrap_or(self.config.default_depth);
        if !self.config.accepts_depth(depth) {
            tracing::warn!(depth, max = self.config.max_depth, "rejected search depth");
            return Err(LineageError::InvalidDepth { depth });
        }

        let view = LineageView::build(root, depth, &self.relations)?;
        self.measured.clear();
        Ok(self.view.insert(view))
    }

    pub fn view(&self) -> Option<&LineageView> {
        self.view.as_ref()
    }

    // =========================================================================
    // Measurement and connectors
    // =========================================================================

    pub fn set_container(&mut self, container: BoundingBox) {
        self.measured.set_container(container);
    }

    /// Record the measured box of a rendered node.
    pub fn record_box(&mut self, id: ResearcherId, row: RowLabel, bounds: BoundingBox) {
        self.measured.record(id, row, bounds);
    }

    pub fn clear_measurements(&mut self) {
        self.measured.clear();
    }

    pub fn measured(&self) -> &MeasuredLayout {
        &self.measured
    }

    /// Connector segments for one half of the current view. Empty when no
    /// search has succeeded yet.
    pub fn plan_connectors(&self, direction: Direction) -> Result<Vec<LineSegment>> {
        let Some(view) = &self.view else {
            return Ok(Vec::new());
        };
        view.plan_connectors(direction, &self.measured, self.measured.container(), &self.config)
    }

    /// The researcher rendered under a point, for click-to-search.
    pub fn node_at(&self, x: f32, y: f32) -> Option<ResearcherId> {
        self.measured.node_at(x, y).map(|(id, _)| id)
    }
}
