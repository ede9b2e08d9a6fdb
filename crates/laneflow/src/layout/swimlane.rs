//! Swimlane post-processing.
//!
//! Coordinate engines know nothing about actors. This pass turns engine centroids
//! into top-left corners and pushes every node down into the band of the actor
//! that owns it. Lanes are bands stacked from the top, one per actor in input order.

use std::collections::HashMap;

use log::{debug, trace};

use laneflow_core::{geometry::Point, identifier::NodeId, model::Actor};

use crate::{
    layout::{PositionedNode, Swimlane},
    structure::WorkflowGraph,
};

/// Converts centroids into positioned nodes, in graph order.
///
/// A node missing from `centroids` is placed at the origin before its lane offset
/// is applied.
pub(crate) fn position_nodes(
    graph: &WorkflowGraph,
    centroids: &HashMap<NodeId, Point>,
    band_height: f32,
) -> Vec<PositionedNode> {
    graph
        .nodes()
        .map(|node| {
            let size = node.size();
            let centroid = centroids.get(&node.id()).copied().unwrap_or_else(|| {
                debug!(node:% = node.id(); "No centroid for node, placing at origin");
                Point::default()
            });

            let top_left = centroid.sub_point(size.half_extent());
            let offset = node.lane() as f32 * band_height;
            let position = top_left.with_y(top_left.y() + offset);
            trace!(
                node:% = node.id(),
                lane = node.lane(),
                x = position.x(),
                y = position.y();
                "Node positioned"
            );

            PositionedNode {
                id: node.id(),
                name: graph.name_of(node.id()),
                kind: node.kind(),
                label: node.label().to_string(),
                is_sensitive: node.is_sensitive(),
                lane: node.lane(),
                x: position.x(),
                y: position.y(),
                width: size.width(),
                height: size.height(),
            }
        })
        .collect()
}

/// One band per actor, stacked in actor order
pub(crate) fn bands(actors: &[Actor], band_height: f32) -> Vec<Swimlane> {
    actors
        .iter()
        .enumerate()
        .map(|(idx, actor)| Swimlane {
            actor_id: actor.id(),
            title: actor.title().to_string(),
            department: actor.department().to_string(),
            band_top: idx as f32 * band_height,
            band_height,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use laneflow_core::{
        identifier::Id,
        model::{Step, StepKind},
    };

    use super::*;
    use crate::config::NodeSizeConfig;

    #[test]
    fn test_lane_offset_applied_to_top_left() {
        let actors = vec![
            Actor::new("a0", "Clerk", "Records"),
            Actor::new("a1", "Chief", "Records"),
        ];
        let steps = vec![
            Step::new("s1", StepKind::Process, "Receive").with_actor("a0"),
            Step::new("s2", StepKind::Process, "Approve").with_actor("a1"),
        ];
        let graph = WorkflowGraph::from_workflow(&actors, &steps, &NodeSizeConfig::default());

        let mut centroids = HashMap::new();
        centroids.insert(NodeId::Step(Id::new("s1")), Point::new(200.0, 100.0));
        centroids.insert(NodeId::Step(Id::new("s2")), Point::new(200.0, 100.0));
        let nodes = position_nodes(&graph, &centroids, 300.0);

        let s1 = nodes.iter().find(|n| n.id() == NodeId::Step(Id::new("s1"))).unwrap();
        let s2 = nodes.iter().find(|n| n.id() == NodeId::Step(Id::new("s2"))).unwrap();
        assert!(approx_eq!(f32, s1.position().x(), 90.0));
        assert!(approx_eq!(f32, s1.position().y(), 60.0));
        assert!(approx_eq!(f32, s2.position().y() - s1.position().y(), 300.0));
        assert_eq!(s2.lane(), 1);
    }

    #[test]
    fn test_missing_centroid_uses_origin() {
        let actors = vec![Actor::new("a0", "Clerk", "Records")];
        let steps = vec![Step::new("s1", StepKind::Process, "Receive")];
        let graph = WorkflowGraph::from_workflow(&actors, &steps, &NodeSizeConfig::default());

        let nodes = position_nodes(&graph, &HashMap::new(), 200.0);

        assert_eq!(nodes.len(), 3);
        let start = &nodes[0];
        assert_eq!(start.id(), NodeId::Start);
        assert!(approx_eq!(f32, start.position().x(), -110.0));
        assert!(approx_eq!(f32, start.position().y(), -24.0));
    }

    #[test]
    fn test_bands_follow_actor_order() {
        let actors = vec![
            Actor::new("b", "Chief", "Finance"),
            Actor::new("a", "Clerk", "Records").with_order_index(7),
        ];
        let lanes = bands(&actors, 150.0);

        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].actor_id(), "b");
        assert_eq!(lanes[0].band_top(), 0.0);
        assert_eq!(lanes[1].title(), "Clerk");
        assert_eq!(lanes[1].department(), "Records");
        assert_eq!(lanes[1].band_top(), 150.0);
        assert_eq!(lanes[1].band_bottom(), 300.0);
    }
}
