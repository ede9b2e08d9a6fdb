//! Sugiyama coordinate engine.
//!
//! Delegates ranking, crossing minimization and horizontal placement to the
//! rust-sugiyama implementation, then maps its output back onto the layout grid.
//!
//! Every edge is handed over pointing from the earlier node to the later one in
//! input order. The primitive then only ever sees an acyclic graph, so its cycle
//! breaking never flips a forward edge and sequential order survives back-edges.
//!
//! rust-sugiyama lays out each weakly connected component separately and only
//! knows about vertices that appear in an edge. Components are placed side by side
//! in the order the library returns them. Nodes it never saw (a step cut off on
//! both sides by decision gaps) get trailing columns on the first rank.

use std::collections::{HashMap, HashSet};

use log::debug;
use rust_sugiyama::configure::Config;

use laneflow_core::{geometry::Point, identifier::NodeId};

use crate::{
    config::SpacingConfig,
    error::LaneflowError,
    layout::engines::{Cell, CoordinateEngine, cells_to_centroids},
    structure::WorkflowGraph,
};

/// Distance between neighbouring vertices in rust-sugiyama's own coordinates.
/// Output x values are divided by it to recover grid columns.
const VERTEX_SPACING: f64 = 10.0;

/// The Sugiyama layout engine for workflow graphs
/// Based on the Sugiyama algorithm for layered drawing of directed graphs
#[derive(Default)]
pub struct Engine {
    spacing: SpacingConfig,
}

impl Engine {
    /// Create a new Sugiyama engine with default spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spacing used to convert grid cells to pixels
    pub fn set_spacing(&mut self, spacing: SpacingConfig) -> &mut Self {
        self.spacing = spacing;
        self
    }

    fn cells(&self, graph: &WorkflowGraph) -> Result<HashMap<NodeId, Cell>, LaneflowError> {
        let node_ids: Vec<NodeId> = graph.nodes().map(|node| node.id()).collect();
        let edges = forward_edges(&graph.simple_edges());

        let mut cells = HashMap::with_capacity(node_ids.len());
        let mut next_column = 0.0_f32;

        if !edges.is_empty() {
            debug!(
                nodes = node_ids.len(),
                edges = edges.len();
                "Applying Sugiyama algorithm"
            );

            // rust-sugiyama may panic on inputs it does not support; turn that into an error
            let call_edges = edges.clone();
            let layouts = std::panic::catch_unwind(move || {
                let config = Config {
                    minimum_length: 1,
                    vertex_spacing: VERTEX_SPACING,
                    ..Default::default()
                };
                rust_sugiyama::from_edges(&call_edges, &config)
            })
            .map_err(|err| {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    format!("Rust-sugiyama layout engine panicked: {panic_msg}")
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    format!("Rust-sugiyama layout engine panicked: {panic_msg}")
                } else {
                    "Rust-sugiyama layout engine panicked with unknown error".to_string()
                };
                LaneflowError::Layout(message)
            })?;

            if layouts.is_empty() {
                return Err(LaneflowError::Layout(
                    "Rust-sugiyama returned empty layout results".to_string(),
                ));
            }

            for (coords, _, _) in &layouts {
                let mut component: Vec<(usize, f64, f64)> = Vec::with_capacity(coords.len());
                for &(id, (x, y)) in coords {
                    if id < node_ids.len() {
                        component.push((id, x, y));
                    } else {
                        debug!(id; "Node ID from rust-sugiyama result is out of range");
                    }
                }
                if component.is_empty() {
                    continue;
                }

                let width =
                    place_component(&component, &edges, &node_ids, next_column, &mut cells);
                next_column += width + 1.0;
            }

            if cells.is_empty() {
                return Err(LaneflowError::Layout(
                    "Failed to map any rust-sugiyama positions back to graph nodes".to_string(),
                ));
            }
        }

        for id in &node_ids {
            if !cells.contains_key(id) {
                debug!(node:% = id; "Node outside every edge, placing on first rank");
                cells.insert(*id, Cell::new(next_column, 0));
                next_column += 1.0;
            }
        }

        Ok(cells)
    }
}

/// Orients every edge from the lower to the higher input position.
///
/// A back-edge and its forward twin collapse into one pair.
fn forward_edges(simple_edges: &[(usize, usize)]) -> Vec<(u32, u32)> {
    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(simple_edges.len());
    for &(source, target) in simple_edges {
        let pair = (source.min(target) as u32, source.max(target) as u32);
        if !edges.contains(&pair) {
            edges.push(pair);
        }
    }
    edges
}

/// Places one connected component starting at `column_offset`.
///
/// Returns the width of the component in columns.
fn place_component(
    component: &[(usize, f64, f64)],
    edges: &[(u32, u32)],
    node_ids: &[NodeId],
    column_offset: f32,
    cells: &mut HashMap<NodeId, Cell>,
) -> f32 {
    let level_of = |y: f64| (y * 1000.0).round() as i64;
    let levels: HashMap<usize, i64> = component
        .iter()
        .map(|&(id, _, y)| (id, level_of(y)))
        .collect();

    // Guard against a y axis that grows upward: most edges must point down.
    let mut downward = 0usize;
    let mut upward = 0usize;
    for &(source, target) in edges {
        if let (Some(&s), Some(&t)) = (
            levels.get(&(source as usize)),
            levels.get(&(target as usize)),
        ) {
            if t > s {
                downward += 1;
            } else if t < s {
                upward += 1;
            }
        }
    }

    let mut distinct: Vec<i64> = levels
        .values()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    distinct.sort_unstable();
    if upward > downward {
        distinct.reverse();
    }
    let rank_of: HashMap<i64, usize> = distinct
        .iter()
        .enumerate()
        .map(|(rank, &level)| (level, rank))
        .collect();

    let min_x = component
        .iter()
        .map(|&(_, x, _)| x)
        .fold(f64::INFINITY, f64::min);
    let max_x = component
        .iter()
        .map(|&(_, x, _)| x)
        .fold(f64::NEG_INFINITY, f64::max);

    for &(id, x, y) in component {
        let column = ((x - min_x) / VERTEX_SPACING) as f32 + column_offset;
        let rank = rank_of[&level_of(y)];
        cells.insert(node_ids[id], Cell::new(column, rank));
    }

    ((max_x - min_x) / VERTEX_SPACING) as f32
}

impl CoordinateEngine for Engine {
    fn assign_coordinates(
        &self,
        graph: &WorkflowGraph,
    ) -> Result<HashMap<NodeId, Point>, LaneflowError> {
        let cells = self.cells(graph)?;
        let centroids = cells_to_centroids(graph, &cells, &self.spacing);
        debug!(positioned = centroids.len(); "Sugiyama layout generated");
        Ok(centroids)
    }
}
