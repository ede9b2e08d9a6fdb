//! Basic coordinate engine
//!
//! Deterministic layering driven by input order. A node sits one rank below the
//! lowest of its predecessors that come earlier in the input. Edges pointing back
//! to earlier nodes do not constrain ranks, so loops in the process never push nodes
//! downward. Within a rank, nodes keep input order and the rank is centered against
//! the widest one.

use std::collections::HashMap;

use log::debug;

use laneflow_core::{geometry::Point, identifier::NodeId};

use crate::{
    config::SpacingConfig,
    error::LaneflowError,
    layout::engines::{Cell, CoordinateEngine, cells_to_centroids},
    structure::WorkflowGraph,
};

/// Basic layering engine
#[derive(Default)]
pub struct Engine {
    spacing: SpacingConfig,
}

impl Engine {
    /// Create a new basic engine with default spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spacing used to convert grid cells to pixels
    pub fn set_spacing(&mut self, spacing: SpacingConfig) -> &mut Self {
        self.spacing = spacing;
        self
    }

    /// Grid cell for every node of the graph
    pub(crate) fn cells(&self, graph: &WorkflowGraph) -> HashMap<NodeId, Cell> {
        let node_ids: Vec<NodeId> = graph.nodes().map(|node| node.id()).collect();

        let mut forward_predecessors: Vec<Vec<usize>> = vec![Vec::new(); node_ids.len()];
        for (source, target) in graph.simple_edges() {
            if source < target {
                forward_predecessors[target].push(source);
            }
        }

        let mut ranks: Vec<usize> = Vec::with_capacity(node_ids.len());
        for predecessors in &forward_predecessors {
            let rank = predecessors
                .iter()
                .map(|&pred| ranks[pred] + 1)
                .max()
                .unwrap_or(0);
            ranks.push(rank);
        }

        let rank_count = ranks.iter().copied().max().map_or(0, |max| max + 1);
        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for (position, &rank) in ranks.iter().enumerate() {
            rows[rank].push(position);
        }
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = HashMap::with_capacity(node_ids.len());
        for (rank, row) in rows.iter().enumerate() {
            let indent = (widest - row.len()) as f32 / 2.0;
            for (column, &position) in row.iter().enumerate() {
                cells.insert(node_ids[position], Cell::new(indent + column as f32, rank));
            }
        }

        debug!(ranks = rank_count, widest_rank = widest; "Basic layering complete");
        cells
    }

    /// Pixel centroids; this engine cannot fail
    pub(crate) fn centroids(&self, graph: &WorkflowGraph) -> HashMap<NodeId, Point> {
        let cells = self.cells(graph);
        cells_to_centroids(graph, &cells, &self.spacing)
    }
}

impl CoordinateEngine for Engine {
    fn assign_coordinates(
        &self,
        graph: &WorkflowGraph,
    ) -> Result<HashMap<NodeId, Point>, LaneflowError> {
        Ok(self.centroids(graph))
    }
}
