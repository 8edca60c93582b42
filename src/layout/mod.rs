//! Lineage layout.
//!
//! The layout runs in stages with a plain value handed from one to the next:
//! [`expand`] walks the relation index into a [`Forest`], [`compute_spans`]
//! derives the [`SpanTable`] that sizes each node on the column grid, and
//! [`place_rows`] turns both into per-row cell placements for the renderer.
//! Connector geometry is planned afterwards from the rendered boxes, see
//! [`crate::connector`].

pub mod config;
pub mod expand;
pub mod forest;
pub mod grid;
pub mod span;

pub use config::LineageConfig;
pub use expand::{Expansion, expand};
pub use forest::{Direction, Forest, Group, Level};
pub use grid::{Cell, RowLabel, RowPlacement, place_rows, root_placement};
pub use span::{SpanTable, compute_spans};
