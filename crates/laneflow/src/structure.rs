//! Layout graph construction.
//!
//! Turns the caller's actors and ordered steps into a [`WorkflowGraph`]: a directed
//! graph with one synthetic start node, one node per step and one synthetic end node.
//! Every node carries the size it is registered with and the swimlane it belongs to.
//!
//! # Edge derivation
//!
//! Edges come from a single scan over the steps in input order:
//!
//! - start → first step.
//! - For every later step, look at the step immediately before it. A non-decision
//!   predecessor gets a plain edge to it. A decision predecessor gets **no**
//!   positional edge; it only connects to the steps named by its `yes_target` and
//!   `no_target`, which are emitted as labeled edges when the scan reaches the
//!   decision.
//! - last step → end.
//!
//! A decision whose targets are unset (or name a step that does not exist) therefore
//! leaves a gap in the graph. That gap is part of the contract and is not reported.
//! Whether unmatched decision outcomes should fall back to the next step is still an
//! open design question; until it is settled the gap stays.
//!
//! # Boundary names
//!
//! Start and end are written out as `__start__` and `__end__`. A step that already
//! uses one of those identifiers pushes the boundary to `__start__1`, `__start__2`
//! and so on, so node and edge identifiers stay unique in the output.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::graph::{DiGraph, NodeIndex};

use laneflow_core::{
    draw::{BranchLabel, NodeKind},
    geometry::Size,
    identifier::{Id, NodeId},
    model::{Actor, Step},
};

use crate::config::NodeSizeConfig;

/// A node of the layout graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: NodeId,
    kind: NodeKind,
    label: String,
    is_sensitive: bool,
    lane: usize,
    size: Size,
}

impl GraphNode {
    pub fn id(&self) -> NodeId {
        self.id
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

    /// Index of the owning actor's swimlane, 0 when the step has no known actor
    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Size registered with the coordinate engine
    pub fn size(&self) -> Size {
        self.size
    }
}

/// An edge of the layout graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    id: String,
    branch: Option<BranchLabel>,
}

impl GraphEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The decision outcome this edge represents, if any
    pub fn branch(&self) -> Option<BranchLabel> {
        self.branch
    }
}

/// Directed graph of one workflow, built fresh for every layout computation.
#[derive(Debug)]
pub struct WorkflowGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    indices: IndexMap<NodeId, NodeIndex>,
    start_name: String,
    end_name: String,
}

impl WorkflowGraph {
    /// Builds the layout graph for a workflow.
    ///
    /// The caller is responsible for short-circuiting empty input; with no steps the
    /// graph still holds the two boundary nodes joined by nothing.
    pub fn from_workflow(actors: &[Actor], steps: &[Step], sizes: &NodeSizeConfig) -> Self {
        let step_ids: HashSet<Id> = steps.iter().map(Step::id).collect();
        let mut builder = Self {
            graph: DiGraph::with_capacity(steps.len() + 2, steps.len() + 1),
            indices: IndexMap::with_capacity(steps.len() + 2),
            start_name: boundary_name(NodeId::Start, &step_ids),
            end_name: boundary_name(NodeId::End, &step_ids),
        };

        let mut lanes: HashMap<Id, usize> = HashMap::with_capacity(actors.len());
        for (idx, actor) in actors.iter().enumerate() {
            lanes.entry(actor.id()).or_insert(idx);
        }

        builder.add_node(GraphNode {
            id: NodeId::Start,
            kind: NodeKind::Start,
            label: "Start".to_string(),
            is_sensitive: false,
            lane: 0,
            size: sizes.size_for(NodeKind::Start),
        });

        for step in steps {
            let kind = NodeKind::from(step.kind());
            let lane = match step.actor() {
                Some(actor) => lanes.get(&actor).copied().unwrap_or_else(|| {
                    debug!(step:% = step.id(), actor:% = actor; "Unknown actor, using lane 0");
                    0
                }),
                None => 0,
            };
            builder.add_node(GraphNode {
                id: NodeId::Step(step.id()),
                kind,
                label: step.label().to_string(),
                is_sensitive: step.is_sensitive(),
                lane,
                size: sizes.size_for(kind),
            });
        }

        builder.add_node(GraphNode {
            id: NodeId::End,
            kind: NodeKind::End,
            label: "End".to_string(),
            is_sensitive: false,
            lane: 0,
            size: sizes.size_for(NodeKind::End),
        });

        builder.derive_edges(steps);

        debug!(
            nodes = builder.node_count(),
            edges = builder.edge_count();
            "Workflow graph built"
        );
        trace!(graph:? = &builder.graph; "Workflow graph");

        builder
    }

    fn add_node(&mut self, node: GraphNode) {
        let id = node.id;
        if self.indices.contains_key(&id) {
            debug!(node:% = id; "Duplicate step identifier ignored");
            return;
        }
        let idx = self.graph.add_node(node);
        self.indices.insert(id, idx);
    }

    fn add_edge(&mut self, source: NodeId, target: NodeId, branch: Option<BranchLabel>) {
        let (Some(&source_idx), Some(&target_idx)) =
            (self.indices.get(&source), self.indices.get(&target))
        else {
            return;
        };

        let (source, target) = (self.name_of(source), self.name_of(target));
        let id = match branch {
            Some(label) => format!("e-{source}-{target}-{label}"),
            None => format!("e-{source}-{target}"),
        };
        self.graph
            .add_edge(source_idx, target_idx, GraphEdge { id, branch });
    }

    fn derive_edges(&mut self, steps: &[Step]) {
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return;
        };

        self.add_edge(NodeId::Start, NodeId::Step(first.id()), None);

        let mut previous: Option<&Step> = None;
        for step in steps {
            if let Some(prev) = previous {
                if !prev.is_decision() {
                    self.add_edge(NodeId::Step(prev.id()), NodeId::Step(step.id()), None);
                }
            }

            if step.is_decision() {
                self.add_branch_edges(step);
            }

            previous = Some(step);
        }

        self.add_edge(NodeId::Step(last.id()), NodeId::End, None);
    }

    fn add_branch_edges(&mut self, decision: &Step) {
        let outcomes = [
            (BranchLabel::Yes, decision.yes_target()),
            (BranchLabel::No, decision.no_target()),
        ];

        for (label, target) in outcomes {
            let Some(target) = target else {
                continue;
            };
            let target = NodeId::Step(target);
            if self.indices.contains_key(&target) {
                self.add_edge(NodeId::Step(decision.id()), target, Some(label));
            } else {
                debug!(
                    decision:% = decision.id(),
                    target:% = target,
                    branch:% = label;
                    "Decision target not found, no edge emitted"
                );
            }
        }
    }

    /// Iterates over nodes in insertion order: start, steps, end
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.indices.values().map(|&idx| &self.graph[idx])
    }

    /// Iterates over edges in creation order as `(source, target, edge)`
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, &GraphEdge)> {
        self.graph.edge_indices().filter_map(|idx| {
            let (source, target) = self.graph.edge_endpoints(idx)?;
            Some((&self.graph[source], &self.graph[target], &self.graph[idx]))
        })
    }

    /// Returns the node with the given identifier
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.indices.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Identifier the node is written out under, unique within this graph
    pub fn name_of(&self, id: NodeId) -> String {
        match id {
            NodeId::Start => self.start_name.clone(),
            NodeId::End => self.end_name.clone(),
            NodeId::Step(id) => id.to_string(),
        }
    }

    /// Returns the dense index of a node, matching its position in [`Self::nodes`]
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.indices.get_index_of(&id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges as pairs of dense node positions, without self-loops or duplicates.
    ///
    /// This is the shape layered layout primitives consume.
    pub fn simple_edges(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::with_capacity(self.edge_count());
        for (source, target, _) in self.edges() {
            let (Some(source), Some(target)) =
                (self.position_of(source.id), self.position_of(target.id))
            else {
                continue;
            };
            if source != target && !pairs.contains(&(source, target)) {
                pairs.push((source, target));
            }
        }
        pairs
    }
}

/// First of `base`, `base1`, `base2`, ... that no step identifier uses
fn boundary_name(boundary: NodeId, step_ids: &HashSet<Id>) -> String {
    let base = boundary.to_string();
    if !step_ids.contains(&Id::new(&base)) {
        return base;
    }
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if !step_ids.contains(&Id::new(&candidate)) {
            debug!(boundary:% = boundary, name = candidate; "Boundary identifier taken by a step, renamed");
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use laneflow_core::model::StepKind;

    use super::*;

    fn edge_list(graph: &WorkflowGraph) -> Vec<(String, String, Option<BranchLabel>)> {
        graph
            .edges()
            .map(|(s, t, e)| (s.id().to_string(), t.id().to_string(), e.branch()))
            .collect()
    }

    fn clerk() -> Vec<Actor> {
        vec![Actor::new("a0", "Clerk", "Records")]
    }

    #[test]
    fn test_clerk_example_edges() {
        let steps = vec![
            Step::new("s1", StepKind::Process, "Receive request").with_actor("a0"),
            Step::new("s2", StepKind::Decision, "Complete?")
                .with_actor("a0")
                .with_yes_target("s3")
                .with_no_target("s1"),
            Step::new("s3", StepKind::Document, "Issue certificate").with_actor("a0"),
        ];
        let graph = WorkflowGraph::from_workflow(&clerk(), &steps, &NodeSizeConfig::default());

        assert_eq!(graph.node_count(), 5);
        assert_eq!(
            edge_list(&graph),
            vec![
                ("__start__".into(), "s1".into(), None),
                ("s1".into(), "s2".into(), None),
                ("s2".into(), "s3".into(), Some(BranchLabel::Yes)),
                ("s2".into(), "s1".into(), Some(BranchLabel::No)),
                ("s3".into(), "__end__".into(), None),
            ]
        );
        assert!(graph.nodes().all(|n| n.lane() == 0));
    }

    #[test]
    fn test_decision_fan_out_has_no_positional_edge() {
        let steps = vec![
            Step::new("d", StepKind::Decision, "Approved?")
                .with_yes_target("s3")
                .with_no_target("s4"),
            Step::new("s2", StepKind::Process, "Unrelated"),
            Step::new("s3", StepKind::Process, "Approve"),
            Step::new("s4", StepKind::Process, "Reject"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());
        let edges = edge_list(&graph);

        assert!(edges.contains(&("d".into(), "s3".into(), Some(BranchLabel::Yes))));
        assert!(edges.contains(&("d".into(), "s4".into(), Some(BranchLabel::No))));
        assert!(!edges.iter().any(|(s, t, _)| s == "d" && t == "s2"));
    }

    #[test]
    fn test_missing_targets_leave_a_gap() {
        let steps = vec![
            Step::new("d", StepKind::Decision, "Approved?"),
            Step::new("s", StepKind::Process, "Archive"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());
        let edges = edge_list(&graph);

        assert!(!edges
            .iter()
            .any(|(s, t, _)| (s == "d" && t == "s") || (s == "s" && t == "d")));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_dangling_target_is_dropped() {
        let steps = vec![
            Step::new("d", StepKind::Decision, "Approved?").with_yes_target("ghost"),
            Step::new("s", StepKind::Process, "Archive"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());

        assert!(!edge_list(&graph).iter().any(|(_, t, _)| t == "ghost"));
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_last_decision_still_reaches_end() {
        let steps = vec![
            Step::new("s1", StepKind::Process, "Prepare"),
            Step::new("d", StepKind::Decision, "Done?").with_no_target("s1"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());

        assert!(edge_list(&graph).contains(&("d".into(), "__end__".into(), None)));
    }

    #[test]
    fn test_lanes_follow_actor_list_position() {
        let actors = vec![
            Actor::new("clerk", "Clerk", "Records").with_order_index(7),
            Actor::new("chief", "Chief", "Records").with_order_index(1),
        ];
        let steps = vec![
            Step::new("s1", StepKind::Process, "Receive").with_actor("clerk"),
            Step::new("s2", StepKind::Process, "Sign").with_actor("chief"),
            Step::new("s3", StepKind::Process, "File").with_actor("nobody"),
            Step::new("s4", StepKind::Process, "Close"),
        ];
        let graph = WorkflowGraph::from_workflow(&actors, &steps, &NodeSizeConfig::default());
        let lane = |id: &str| graph.node(NodeId::Step(Id::new(id))).unwrap().lane();

        assert_eq!(lane("s1"), 0);
        assert_eq!(lane("s2"), 1);
        assert_eq!(lane("s3"), 0);
        assert_eq!(lane("s4"), 0);
        assert_eq!(graph.node(NodeId::Start).unwrap().lane(), 0);
    }

    #[test]
    fn test_sizes_registered_per_kind() {
        let sizes = NodeSizeConfig::default();
        let steps = vec![
            Step::new("p", StepKind::Process, "P"),
            Step::new("d", StepKind::Decision, "D"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &sizes);

        assert_eq!(
            graph.node(NodeId::Start).unwrap().size(),
            sizes.size_for(NodeKind::Start)
        );
        assert_eq!(
            graph.node(NodeId::Step(Id::new("d"))).unwrap().size(),
            sizes.size_for(NodeKind::Decision)
        );
    }

    #[test]
    fn test_simple_edges_skip_self_loops_and_duplicates() {
        let steps = vec![
            Step::new("d", StepKind::Decision, "Retry?")
                .with_yes_target("d")
                .with_no_target("s"),
            Step::new("s", StepKind::Process, "Go"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());

        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.simple_edges(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_boundary_names_avoid_step_ids() {
        let steps = vec![
            Step::new("__start__", StepKind::Process, "Looks like start"),
            Step::new("__end__", StepKind::Process, "Looks like end"),
            Step::new("__end__1", StepKind::Process, "Also taken"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());

        assert_eq!(graph.name_of(NodeId::Start), "__start__1");
        assert_eq!(graph.name_of(NodeId::End), "__end__2");

        let names: HashSet<String> = graph.nodes().map(|n| graph.name_of(n.id())).collect();
        assert_eq!(names.len(), graph.node_count());

        let ids: Vec<_> = graph.edges().map(|(_, _, e)| e.id().to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "e-__start__1-__start__",
                "e-__start__-__end__",
                "e-__end__-__end__1",
                "e-__end__1-__end__2",
            ]
        );
    }

    #[test]
    fn test_default_boundary_names() {
        let steps = vec![Step::new("s1", StepKind::Process, "Receive")];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());

        assert_eq!(graph.name_of(NodeId::Start), "__start__");
        assert_eq!(graph.name_of(NodeId::End), "__end__");
    }

    #[test]
    fn test_edge_ids_are_unique_for_shared_targets() {
        let steps = vec![
            Step::new("d", StepKind::Decision, "Either way")
                .with_yes_target("s")
                .with_no_target("s"),
            Step::new("s", StepKind::Process, "Go"),
        ];
        let graph = WorkflowGraph::from_workflow(&[], &steps, &NodeSizeConfig::default());
        let ids: Vec<_> = graph.edges().map(|(_, _, e)| e.id().to_string()).collect();

        assert!(ids.contains(&"e-d-s-yes".to_string()));
        assert!(ids.contains(&"e-d-s-no".to_string()));
    }
}
