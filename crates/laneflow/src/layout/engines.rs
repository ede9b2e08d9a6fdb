//! Coordinate engine factory module
//!
//! Coordinate assignment sits behind the narrow [`CoordinateEngine`] trait: a graph
//! with registered node sizes goes in, one centroid per node comes out. Rank flow is
//! always top to bottom. Engines report positions on an abstract grid of columns
//! and ranks, and [`cells_to_centroids`] converts that grid to pixels using the
//! configured spacing. Every engine therefore produces comparable coordinates.

mod basic;
mod sugiyama;

use std::collections::HashMap;

use log::trace;

use laneflow_core::{
    geometry::{Point, Size},
    identifier::NodeId,
};

use crate::{
    config::{LayoutEngine, SpacingConfig},
    error::LaneflowError,
    structure::WorkflowGraph,
};

/// Trait defining the interface for coordinate assignment engines
pub trait CoordinateEngine {
    /// Assign a centroid to every node of `graph`.
    ///
    /// # Errors
    /// Returns `LaneflowError::Layout` if the engine cannot place the graph.
    fn assign_coordinates(
        &self,
        graph: &WorkflowGraph,
    ) -> Result<HashMap<NodeId, Point>, LaneflowError>;
}

/// Builder for creating and configuring coordinate engines.
#[derive(Default)]
pub struct EngineBuilder {
    spacing: SpacingConfig,
}

impl EngineBuilder {
    /// Create a new engine builder with default spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set node/rank separation and outer margins
    pub fn with_spacing(mut self, spacing: SpacingConfig) -> Self {
        self.spacing = spacing;
        self
    }

    /// Build an engine of the specified type with the configured options
    pub fn build(self, engine_type: LayoutEngine) -> Box<dyn CoordinateEngine> {
        match engine_type {
            LayoutEngine::Basic => {
                let mut engine = basic::Engine::new();
                engine.set_spacing(self.spacing);
                Box::new(engine)
            }
            LayoutEngine::Sugiyama => {
                let mut engine = sugiyama::Engine::new();
                engine.set_spacing(self.spacing);
                Box::new(engine)
            }
        }
    }
}

/// Infallible placement used when the configured engine fails
pub(crate) fn fallback_centroids(
    graph: &WorkflowGraph,
    spacing: SpacingConfig,
) -> HashMap<NodeId, Point> {
    let mut engine = basic::Engine::new();
    engine.set_spacing(spacing);
    engine.centroids(graph)
}

/// Position of a node on the abstract layout grid.
///
/// Columns may be fractional; layered layouts center parents over children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    column: f32,
    rank: usize,
}

impl Cell {
    pub(crate) fn new(column: f32, rank: usize) -> Self {
        Self { column, rank }
    }

    #[cfg(test)]
    pub(crate) fn column(self) -> f32 {
        self.column
    }

    #[cfg(test)]
    pub(crate) fn rank(self) -> usize {
        self.rank
    }
}

/// Converts grid cells to pixel centroids.
///
/// Every column is as wide as the widest registered node plus the node separation,
/// and every rank as tall as the tallest node plus the rank separation. The first
/// cell's box starts at the outer margins.
pub(crate) fn cells_to_centroids(
    graph: &WorkflowGraph,
    cells: &HashMap<NodeId, Cell>,
    spacing: &SpacingConfig,
) -> HashMap<NodeId, Point> {
    let max_size = graph
        .nodes()
        .map(|node| node.size())
        .fold(Size::default(), |acc, size| acc.max(size));

    let column_pitch = max_size.width() + spacing.node_separation();
    let rank_pitch = max_size.height() + spacing.rank_separation();

    let centroids: HashMap<NodeId, Point> = cells
        .iter()
        .map(|(&id, cell)| {
            let x = spacing.margin_x() + cell.column * column_pitch + max_size.width() / 2.0;
            let y = spacing.margin_y() + cell.rank as f32 * rank_pitch + max_size.height() / 2.0;
            (id, Point::new(x, y))
        })
        .collect();

    trace!(centroids:? = &centroids; "Grid converted to centroids");
    centroids
}
