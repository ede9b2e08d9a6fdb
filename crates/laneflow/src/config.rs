//! Configuration types for Laneflow layouts.
//!
//! This module provides configuration structures that control node sizing, spacing,
//! swimlane banding and the coordinate engine. All types implement
//! [`serde::Deserialize`] and every field has a default, so a partial TOML file is
//! enough.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Engine selection, band height, node sizes and spacing.
//! - [`NodeSizeConfig`] - Registered node sizes per kind.
//! - [`SpacingConfig`] - Separation between nodes and ranks plus outer margins.
//!
//! # Example
//!
//! ```
//! # use laneflow::config::{AppConfig, LayoutEngine};
//! let config: AppConfig = toml::from_str("[layout]\nengine = \"basic\"").unwrap();
//! assert_eq!(config.layout().engine(), LayoutEngine::Basic);
//! assert_eq!(config.layout().band_height(), 200.0);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use laneflow_core::{
    draw::NodeKind,
    geometry::Size,
};

use crate::error::LaneflowError;

/// Available coordinate assignment engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Deterministic layering by input order
    Basic,
    /// Layered Sugiyama layout (default)
    #[default]
    Sugiyama,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "sugiyama" => Ok(Self::Sugiyama),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Basic => "basic",
            LayoutEngine::Sugiyama => "sugiyama",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Checks that every size and spacing is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), LaneflowError> {
        let layout = &self.layout;
        let fields = [
            ("layout.band_height", layout.band_height),
            ("layout.node.width", layout.node.width),
            ("layout.node.height", layout.node.height),
            ("layout.node.pill_height", layout.node.pill_height),
            ("layout.node.decision_width", layout.node.decision_width),
            ("layout.node.decision_height", layout.node.decision_height),
            ("layout.spacing.node_separation", layout.spacing.node_separation),
            ("layout.spacing.rank_separation", layout.spacing.rank_separation),
            ("layout.spacing.margin_x", layout.spacing.margin_x),
            ("layout.spacing.margin_y", layout.spacing.margin_y),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LaneflowError::Config(format!(
                    "`{name}` must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Layout section of the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    engine: LayoutEngine,
    /// Height of one actor band; a node in lane `n` is shifted down by `n` bands
    band_height: f32,
    node: NodeSizeConfig,
    spacing: SpacingConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            band_height: 200.0,
            node: NodeSizeConfig::default(),
            spacing: SpacingConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn set_engine(&mut self, engine: LayoutEngine) -> &mut Self {
        self.engine = engine;
        self
    }

    pub fn band_height(&self) -> f32 {
        self.band_height
    }

    pub fn set_band_height(&mut self, band_height: f32) -> &mut Self {
        self.band_height = band_height;
        self
    }

    pub fn node(&self) -> &NodeSizeConfig {
        &self.node
    }

    pub fn spacing(&self) -> &SpacingConfig {
        &self.spacing
    }
}

/// Registered node sizes.
///
/// Decision nodes render as diamonds, which need a larger bounding box than the
/// visible shape so that edges do not cut through the corners. Start and end render
/// as short capsules and use `pill_height`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeSizeConfig {
    width: f32,
    height: f32,
    pill_height: f32,
    decision_width: f32,
    decision_height: f32,
}

impl Default for NodeSizeConfig {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 80.0,
            pill_height: 48.0,
            decision_width: 260.0,
            decision_height: 160.0,
        }
    }
}

impl NodeSizeConfig {
    /// Returns the size registered with the layout engine for a node kind
    pub fn size_for(&self, kind: NodeKind) -> Size {
        match kind {
            NodeKind::Start | NodeKind::End => Size::new(self.width, self.pill_height),
            NodeKind::Decision => Size::new(self.decision_width, self.decision_height),
            NodeKind::Process | NodeKind::Document | NodeKind::System => {
                Size::new(self.width, self.height)
            }
        }
    }
}

/// Separation constants handed to the coordinate engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Horizontal gap between nodes on the same rank
    node_separation: f32,
    /// Vertical gap between ranks
    rank_separation: f32,
    margin_x: f32,
    margin_y: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            node_separation: 80.0,
            rank_separation: 100.0,
            margin_x: 50.0,
            margin_y: 50.0,
        }
    }
}

impl SpacingConfig {
    pub fn new(node_separation: f32, rank_separation: f32, margin_x: f32, margin_y: f32) -> Self {
        Self {
            node_separation,
            rank_separation,
            margin_x,
            margin_y,
        }
    }

    pub fn node_separation(&self) -> f32 {
        self.node_separation
    }

    pub fn rank_separation(&self) -> f32 {
        self.rank_separation
    }

    /// Left margin before the first column
    pub fn margin_x(&self) -> f32 {
        self.margin_x
    }

    /// Top margin above the first rank
    pub fn margin_y(&self) -> f32 {
        self.margin_y
    }
}
