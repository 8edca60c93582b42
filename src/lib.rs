//! Master Tree - WASM Module
//!
//! This module provides the layout engine behind the Master Tree academic
//! lineage chart: a researcher's advisors stacked above them and their
//! advisees below, on a fixed-column grid with org-chart connectors. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `relation`: researcher ids, relation index, researcher directory
//! - `layout`: forest expansion, span computation, grid placement
//! - `connector`: connector geometry from measured node boxes
//! - `spatial`: measured boxes and R-tree hit testing
//! - `view` / `engine`: both chart halves and the per-session state
//!
//! # Render protocol
//!
//! 1. `search` builds the forests, spans and row placements.
//! 2. The page renders the rows and lets the browser lay them out.
//! 3. The page reports each node's box via `recordBox` (and the container
//!    via `setContainer`).
//! 4. `planConnectors` returns the segments to draw.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod connector;
pub mod engine;
pub mod error;
pub mod layout;
pub mod relation;
pub mod spatial;
pub mod view;

pub use error::LineageError;

use connector::{BoundingBox, flatten_segments};
use engine::LineageEngine;
use layout::{Direction, LineageConfig, RowLabel};
use relation::{Relation, RelationIndex, Researcher, ResearcherId};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: LineageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Main entry point for the lineage chart.
///
/// This struct wraps the internal LineageEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct MasterTreeWasm {
    engine: LineageEngine,
}

#[wasm_bindgen]
impl MasterTreeWasm {
    /// Create an engine with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: LineageEngine::new(),
        }
    }

    /// Create an engine from a (possibly partial) config object, e.g.
    /// `{ stubLength: 8, busOffset: 9, defaultDepth: 2, maxDepth: 3 }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> std::result::Result<MasterTreeWasm, JsValue> {
        let config: LineageConfig = if config.is_undefined() || config.is_null() {
            LineageConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            engine: LineageEngine::with_config(config),
        })
    }

    // =========================================================================
    // Dataset
    // =========================================================================

    /// Load relation records `[{ id, advisors, advisees }, ...]`.
    ///
    /// Returns the number of researchers indexed.
    #[wasm_bindgen(js_name = loadRelations)]
    pub fn load_relations(&mut self, relations: JsValue) -> std::result::Result<u32, JsValue> {
        let relations: Vec<Relation> = serde_wasm_bindgen::from_value(relations)?;
        let index = RelationIndex::from_relations(relations);
        let count = index.len() as u32;
        self.engine.load_relations(index);
        Ok(count)
    }

    /// Load researcher records. With `deriveRelations` the relation index is
    /// rebuilt from the records' advisor names.
    #[wasm_bindgen(js_name = loadResearchers)]
    pub fn load_researchers(
        &mut self,
        researchers: JsValue,
        derive_relations: bool,
    ) -> std::result::Result<u32, JsValue> {
        let records: Vec<Researcher> = serde_wasm_bindgen::from_value(researchers)?;
        let count = records.len() as u32;
        self.engine.load_researchers(records, derive_relations);
        Ok(count)
    }

    /// Resolve a search query (id or name) to a researcher id.
    #[wasm_bindgen(js_name = resolveId)]
    pub fn resolve_id(&self, query: &str) -> Option<u32> {
        self.engine.resolve(query).ok().map(ResearcherId::raw)
    }

    /// Get a researcher record, or undefined.
    pub fn researcher(&self, id: u32) -> std::result::Result<JsValue, JsValue> {
        match self.engine.researcher(ResearcherId(id)) {
            Some(record) => Ok(serde_wasm_bindgen::to_value(record)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Build the chart around `root`. A depth of 0 uses the configured
    /// default.
    ///
    /// Returns the view (forests, spans, row placements). Throws with a
    /// message when the researcher is unknown; the previous view stays.
    pub fn search(&mut self, root: u32, depth: u32) -> std::result::Result<JsValue, JsValue> {
        let depth = (depth > 0).then_some(depth as usize);
        match self.engine.search(ResearcherId(root), depth) {
            Ok(view) => Ok(serde_wasm_bindgen::to_value(view)?),
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
                Err(to_js(err))
            }
        }
    }

    /// The current view, or undefined before the first successful search.
    pub fn view(&self) -> std::result::Result<JsValue, JsValue> {
        match self.engine.view() {
            Some(view) => Ok(serde_wasm_bindgen::to_value(view)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Set the box of the element connectors are drawn in.
    #[wasm_bindgen(js_name = setContainer)]
    pub fn set_container(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.engine.set_container(BoundingBox::new(x, y, width, height));
    }

    /// Record the measured box of a rendered node on row `row`
    /// (`"root"`, `"advisor-<n>"` or `"advisee-<n>"`).
    #[wasm_bindgen(js_name = recordBox)]
    pub fn record_box(
        &mut self,
        id: u32,
        row: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> std::result::Result<(), JsValue> {
        let row: RowLabel = row.parse().map_err(to_js)?;
        self.engine
            .record_box(ResearcherId(id), row, BoundingBox::new(x, y, width, height));
        Ok(())
    }

    /// Forget all measured boxes.
    #[wasm_bindgen(js_name = clearMeasurements)]
    pub fn clear_measurements(&mut self) {
        self.engine.clear_measurements();
    }

    // =========================================================================
    // Connectors
    // =========================================================================

    /// Plan connectors for `"ancestors"` or `"descendants"`.
    ///
    /// Returns a Float32Array of segments [x1, y1, x2, y2, ...] relative to
    /// the container.
    #[wasm_bindgen(js_name = planConnectors)]
    pub fn plan_connectors(&self, direction: &str) -> std::result::Result<Float32Array, JsValue> {
        let direction: Direction = direction.parse().map_err(to_js)?;
        let segments = self.engine.plan_connectors(direction).map_err(to_js)?;
        Ok(Float32Array::from(&flatten_segments(&segments)[..]))
    }

    /// The researcher rendered under a point, for click-to-search.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f32, y: f32) -> Option<u32> {
        self.engine.node_at(x, y).map(ResearcherId::raw)
    }
}

impl Default for MasterTreeWasm {
    fn default() -> Self {
        Self::new()
    }
}
