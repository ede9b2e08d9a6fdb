//! Layout pipeline for swimlane workflows.
//!
//! # Pipeline Position
//!
//! ```text
//! Actors + Steps
//!     ↓ structure
//! WorkflowGraph
//!     ↓ engines (centroids per node)
//!     ↓ swimlane (top-left corners, lane offsets)
//! WorkflowLayout
//! ```
//!
//! # Submodules
//!
//! - [`engines`] - Coordinate engines behind the [`CoordinateEngine`] trait
//! - [`swimlane`] - Conversion of centroids into banded node positions
//! - [`memo`] - Caching of the last computed layout
//!
//! The output types in this module are what renderers consume. They serialize to
//! camelCase JSON.

mod engines;
pub mod memo;
mod swimlane;

pub use engines::{CoordinateEngine, EngineBuilder};

use log::{debug, info, warn};
use serde::Serialize;

use laneflow_core::{
    draw::{BranchLabel, EdgeBadge, NodeKind, NodeTemplate},
    geometry::{Bounds, Point, Size},
    identifier::{Id, NodeId},
    model::{Actor, Step},
};

use crate::{config::LayoutConfig, structure::WorkflowGraph};

/// A node with its resolved top-left position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[serde(skip)]
    id: NodeId,
    #[serde(rename = "id")]
    name: String,
    kind: NodeKind,
    label: String,
    is_sensitive: bool,
    lane: usize,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl PositionedNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Identifier written to the output, unique across the layout
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    /// Swimlane index the node was offset into
    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Top-left corner
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position(), self.size())
    }

    /// Centre of the node's box
    pub fn centre(&self) -> Point {
        self.position().add_point(self.size().half_extent())
    }

    /// Template inputs for the node's renderer
    pub fn template(&self) -> NodeTemplate<'_> {
        NodeTemplate::new(self.kind, &self.label, self.is_sensitive)
    }
}

/// A directed edge between two positioned nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEdge {
    id: String,
    #[serde(skip)]
    source: NodeId,
    #[serde(skip)]
    target: NodeId,
    #[serde(rename = "source")]
    source_name: String,
    #[serde(rename = "target")]
    target_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch_label: Option<BranchLabel>,
}

impl PositionedEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Output identifier of the source node
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Output identifier of the target node
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Handle on the source node, set for decision branches
    pub fn source_handle(&self) -> Option<&str> {
        self.source_handle.as_deref()
    }

    pub fn branch_label(&self) -> Option<BranchLabel> {
        self.branch_label
    }

    /// Badge shown at the edge midpoint
    pub fn badge(&self) -> EdgeBadge {
        EdgeBadge::for_branch(self.branch_label)
    }
}

/// Horizontal band owned by one actor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimlane {
    actor_id: Id,
    title: String,
    department: String,
    band_top: f32,
    band_height: f32,
}

impl Swimlane {
    pub fn actor_id(&self) -> Id {
        self.actor_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn band_top(&self) -> f32 {
        self.band_top
    }

    pub fn band_height(&self) -> f32 {
        self.band_height
    }

    /// Exclusive lower edge of the band
    pub fn band_bottom(&self) -> f32 {
        self.band_top + self.band_height
    }
}

/// Result of one layout computation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowLayout {
    nodes: Vec<PositionedNode>,
    edges: Vec<PositionedEdge>,
    swimlanes: Vec<Swimlane>,
}

impl WorkflowLayout {
    /// Nodes in graph order: start, steps in input order, end
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// Edges in derivation order
    pub fn edges(&self) -> &[PositionedEdge] {
        &self.edges
    }

    /// One band per actor, in actor order
    pub fn swimlanes(&self) -> &[Swimlane] {
        &self.swimlanes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.swimlanes.is_empty()
    }

    /// Returns the node with the given identifier
    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Where an edge's badge is drawn: halfway between the centres of its
    /// endpoints. `None` if the edge does not belong to this layout.
    pub fn badge_anchor(&self, edge: &PositionedEdge) -> Option<Point> {
        let source = self.node(edge.source)?;
        let target = self.node(edge.target)?;
        Some(source.centre().midpoint(target.centre()))
    }

    /// Bounding box of every node and band, or `None` for an empty layout.
    ///
    /// Bands have no horizontal extent of their own, so they only widen the box
    /// vertically.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut nodes = self.nodes.iter().map(PositionedNode::bounds);
        let mut bounds = nodes.next()?;
        for node_bounds in nodes {
            bounds = bounds.merge(&node_bounds);
        }
        for lane in &self.swimlanes {
            let band = Bounds::new_from_top_left(
                Point::new(bounds.min_x(), lane.band_top),
                Size::new(bounds.width(), lane.band_height),
            );
            bounds = bounds.merge(&band);
        }
        Some(bounds)
    }
}

/// Computes the layout of a workflow.
///
/// Returns an empty layout when either input is empty. Never fails: if the
/// configured engine reports an error, the deterministic basic engine is used
/// instead.
pub fn compute(actors: &[Actor], steps: &[Step], config: &LayoutConfig) -> WorkflowLayout {
    if actors.is_empty() || steps.is_empty() {
        debug!(
            actors = actors.len(),
            steps = steps.len();
            "Empty workflow input, returning empty layout"
        );
        return WorkflowLayout::default();
    }

    let graph = WorkflowGraph::from_workflow(actors, steps, config.node());

    let engine = EngineBuilder::new()
        .with_spacing(*config.spacing())
        .build(config.engine());
    let centroids = match engine.assign_coordinates(&graph) {
        Ok(centroids) => centroids,
        Err(err) => {
            warn!(engine:% = config.engine(), err:%; "Coordinate engine failed, using basic layering");
            engines::fallback_centroids(&graph, *config.spacing())
        }
    };

    let nodes = swimlane::position_nodes(&graph, &centroids, config.band_height());
    let edges = graph
        .edges()
        .map(|(source, target, edge)| PositionedEdge {
            id: edge.id().to_string(),
            source: source.id(),
            target: target.id(),
            source_name: graph.name_of(source.id()),
            target_name: graph.name_of(target.id()),
            source_handle: edge.branch().map(|label| label.handle().to_string()),
            branch_label: edge.branch(),
        })
        .collect();
    let swimlanes = swimlane::bands(actors, config.band_height());

    let layout = WorkflowLayout {
        nodes,
        edges,
        swimlanes,
    };
    info!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        swimlanes = layout.swimlanes.len();
        "Workflow layout computed"
    );
    layout
}
