//! Presentation tags for renderers.
//!
//! The layout engine attaches a [`NodeKind`] to every positioned node and an optional
//! [`BranchLabel`] to every edge. Renderers dispatch on those closed sets with an
//! exhaustive `match`. This module holds the shared, technology-neutral part of that
//! dispatch: which shape a node kind uses, which colors a minimap or an edge badge
//! should use.

use std::fmt;

use serde::Serialize;

use crate::{color::Color, model::StepKind};

/// Closed set of node tags produced by the layout engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Process,
    Decision,
    Document,
    System,
}

impl NodeKind {
    /// Returns the visual shape drawn for this node kind
    pub fn shape(self) -> ShapeTemplate {
        match self {
            NodeKind::Start | NodeKind::End => ShapeTemplate::Capsule,
            NodeKind::Process => ShapeTemplate::RoundedRectangle,
            NodeKind::Decision => ShapeTemplate::Diamond,
            NodeKind::Document => ShapeTemplate::FoldedBanner,
            NodeKind::System => ShapeTemplate::HeaderBanner,
        }
    }

    /// Returns the fill used for this kind on an overview minimap
    pub fn minimap_color(self) -> Color {
        match self {
            NodeKind::Start => Color::from_static("#22c55e"),
            NodeKind::End => Color::from_static("#ef4444"),
            NodeKind::Process => Color::from_static("#3b82f6"),
            NodeKind::Decision => Color::from_static("#f59e0b"),
            NodeKind::Document => Color::from_static("#8b5cf6"),
            NodeKind::System => Color::from_static("#64748b"),
        }
    }

    /// Returns true for the synthetic start/end kinds
    pub fn is_boundary(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }
}

impl From<StepKind> for NodeKind {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Process => NodeKind::Process,
            StepKind::Decision => NodeKind::Decision,
            StepKind::Document => NodeKind::Document,
            StepKind::System => NodeKind::System,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::Document => "document",
            NodeKind::System => "system",
        };
        write!(f, "{s}")
    }
}

/// Outline drawn for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeTemplate {
    /// Short pill with fully rounded ends
    Capsule,
    RoundedRectangle,
    /// Rhombus clipped from the bounding box
    Diamond,
    /// Rectangle whose bottom edge is a wave
    FoldedBanner,
    /// Rectangle with a colored strip across the top
    HeaderBanner,
}

/// Outcome of a decision edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchLabel {
    Yes,
    No,
}

impl BranchLabel {
    /// Handle name on the decision node the edge leaves from
    pub fn handle(self) -> &'static str {
        match self {
            BranchLabel::Yes => "yes",
            BranchLabel::No => "no",
        }
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.handle())
    }
}

/// Everything a node template receives
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTemplate<'a> {
    kind: NodeKind,
    label: &'a str,
    is_sensitive: bool,
}

impl<'a> NodeTemplate<'a> {
    pub fn new(kind: NodeKind, label: &'a str, is_sensitive: bool) -> Self {
        Self {
            kind,
            label,
            is_sensitive,
        }
    }

    pub fn shape(&self) -> ShapeTemplate {
        self.kind.shape()
    }

    pub fn label(&self) -> &str {
        self.label
    }

    /// Border color; sensitive steps are outlined in red
    pub fn border_color(&self) -> Color {
        if self.is_sensitive {
            Color::from_static("#dc2626")
        } else {
            Color::from_static("#334155")
        }
    }

    /// Header strip color, only drawn by [`ShapeTemplate::HeaderBanner`]
    pub fn header_color(&self) -> Option<Color> {
        match self.shape() {
            ShapeTemplate::HeaderBanner => Some(self.kind.minimap_color()),
            ShapeTemplate::Capsule
            | ShapeTemplate::RoundedRectangle
            | ShapeTemplate::Diamond
            | ShapeTemplate::FoldedBanner => None,
        }
    }
}

/// Badge drawn at the midpoint of an edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeBadge {
    text: Option<&'static str>,
    color: Color,
}

impl EdgeBadge {
    /// Picks the badge for an edge's branch tag
    ///
    /// # Examples
    ///
    /// ```
    /// use laneflow_core::draw::{BranchLabel, EdgeBadge};
    ///
    /// assert_eq!(EdgeBadge::for_branch(Some(BranchLabel::Yes)).text(), Some("EVET"));
    /// assert_eq!(EdgeBadge::for_branch(None).text(), None);
    /// ```
    pub fn for_branch(branch: Option<BranchLabel>) -> Self {
        match branch {
            Some(BranchLabel::Yes) => Self {
                text: Some("EVET"),
                color: Color::from_static("#16a34a"),
            },
            Some(BranchLabel::No) => Self {
                text: Some("HAYIR"),
                color: Color::from_static("#dc2626"),
            },
            None => Self {
                text: None,
                color: Color::from_static("#6b7280"),
            },
        }
    }

    pub fn text(&self) -> Option<&'static str> {
        self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_per_kind() {
        assert_eq!(NodeKind::Start.shape(), ShapeTemplate::Capsule);
        assert_eq!(NodeKind::End.shape(), ShapeTemplate::Capsule);
        assert_eq!(NodeKind::Process.shape(), ShapeTemplate::RoundedRectangle);
        assert_eq!(NodeKind::Decision.shape(), ShapeTemplate::Diamond);
        assert_eq!(NodeKind::Document.shape(), ShapeTemplate::FoldedBanner);
        assert_eq!(NodeKind::System.shape(), ShapeTemplate::HeaderBanner);
    }

    #[test]
    fn test_step_kind_mapping() {
        assert_eq!(NodeKind::from(StepKind::Decision), NodeKind::Decision);
        assert!(!NodeKind::from(StepKind::System).is_boundary());
        assert!(NodeKind::End.is_boundary());
    }

    #[test]
    fn test_minimap_colors_are_distinct() {
        use std::collections::HashSet;

        let kinds = [
            NodeKind::Start,
            NodeKind::End,
            NodeKind::Process,
            NodeKind::Decision,
            NodeKind::Document,
            NodeKind::System,
        ];
        let colors: HashSet<_> = kinds.iter().map(|k| k.minimap_color()).collect();
        assert_eq!(colors.len(), kinds.len());
    }

    #[test]
    fn test_sensitive_border() {
        let plain = NodeTemplate::new(NodeKind::Process, "Archive", false);
        let sensitive = NodeTemplate::new(NodeKind::Process, "Archive", true);

        assert_ne!(plain.border_color(), sensitive.border_color());
        assert_eq!(plain.label(), "Archive");
    }

    #[test]
    fn test_header_color_only_for_system() {
        assert!(NodeTemplate::new(NodeKind::System, "ERP", false)
            .header_color()
            .is_some());
        assert!(NodeTemplate::new(NodeKind::Document, "Form", false)
            .header_color()
            .is_none());
    }

    #[test]
    fn test_edge_badges() {
        let yes = EdgeBadge::for_branch(Some(BranchLabel::Yes));
        let no = EdgeBadge::for_branch(Some(BranchLabel::No));
        let plain = EdgeBadge::for_branch(None);

        assert_eq!(yes.text(), Some("EVET"));
        assert_eq!(no.text(), Some("HAYIR"));
        assert_eq!(plain.text(), None);
        assert_ne!(yes.color(), no.color());
        assert_ne!(no.color(), plain.color());
    }

    #[test]
    fn test_branch_serialization() {
        let json = serde_json::to_string(&[BranchLabel::Yes, BranchLabel::No]).unwrap();
        assert_eq!(json, r#"["yes","no"]"#);
        assert_eq!(serde_json::to_string(&NodeKind::Decision).unwrap(), "\"decision\"");
    }
}
