//! Laneflow - Swimlane-aware auto-layout for municipal process workflows.
//!
//! Takes an ordered list of actors (swimlanes) and an ordered list of steps,
//! builds a directed graph framed by synthetic start and end nodes, assigns
//! coordinates with a layered layout engine and pushes every node into the
//! horizontal band of the actor that owns it. The result is plain positioned data
//! for a renderer to draw.
//!
//! # Examples
//!
//! ```
//! use laneflow::model::{Actor, Step, StepKind};
//!
//! let actors = vec![Actor::new("a0", "Clerk", "Records")];
//! let steps = vec![
//!     Step::new("s1", StepKind::Process, "Receive request").with_actor("a0"),
//!     Step::new("s2", StepKind::Decision, "Complete?")
//!         .with_actor("a0")
//!         .with_yes_target("s3")
//!         .with_no_target("s1"),
//!     Step::new("s3", StepKind::Document, "Issue certificate").with_actor("a0"),
//! ];
//!
//! let layout = laneflow::layout(&actors, &steps);
//! assert_eq!(layout.nodes().len(), 5);
//! assert_eq!(layout.edges().len(), 5);
//! assert_eq!(layout.swimlanes().len(), 1);
//! ```

pub mod config;
pub mod document;
pub mod layout;
pub mod structure;

mod error;

pub use laneflow_core::{color, draw, geometry, identifier, model};

pub use error::LaneflowError;

use log::{debug, info, trace};

use config::AppConfig;
use document::DocumentFormat;
use layout::WorkflowLayout;
use model::{Actor, Step, Workflow};

/// Computes a layout with the default configuration.
///
/// Returns an empty layout when either list is empty.
pub fn layout(actors: &[Actor], steps: &[Step]) -> WorkflowLayout {
    layout::compute(actors, steps, &config::LayoutConfig::default())
}

/// Builder for loading workflows and computing their layouts.
///
/// # Examples
///
/// ```
/// use laneflow::{WorkflowLayouter, config::AppConfig, document::DocumentFormat};
///
/// let source = r#"
/// [[actors]]
/// id = "a0"
/// title = "Clerk"
/// department = "Records"
///
/// [[steps]]
/// id = "s1"
/// kind = "process"
/// label = "Receive request"
/// actor = "a0"
/// "#;
///
/// let layouter = WorkflowLayouter::new(AppConfig::default());
/// let workflow = layouter.parse(source, DocumentFormat::Toml).expect("valid document");
/// let json = layouter.to_json(&layouter.layout(&workflow)).expect("serializable");
/// assert!(json.contains("\"swimlanes\""));
/// ```
#[derive(Debug, Default)]
pub struct WorkflowLayouter {
    config: AppConfig,
}

impl WorkflowLayouter {
    /// Create a new layouter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including engine, sizes and spacing
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this layouter was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a workflow document.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::Document`] if the source is not a valid document.
    pub fn parse(&self, source: &str, format: DocumentFormat) -> Result<Workflow, LaneflowError> {
        info!(format:% = format; "Parsing workflow");
        let workflow = document::parse_workflow(source, format)?;
        debug!("Workflow parsed successfully");
        Ok(workflow)
    }

    /// Lay out a parsed workflow.
    pub fn layout(&self, workflow: &Workflow) -> WorkflowLayout {
        self.layout_steps(workflow.actors(), workflow.steps())
    }

    /// Lay out an actor list and a step list directly.
    pub fn layout_steps(&self, actors: &[Actor], steps: &[Step]) -> WorkflowLayout {
        info!(
            engine:% = self.config.layout().engine(),
            actors = actors.len(),
            steps = steps.len();
            "Computing workflow layout"
        );
        let layout = layout::compute(actors, steps, self.config.layout());
        trace!(layout:?; "Computed layout");
        layout
    }

    /// Serialize a layout to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::Export`] if serialization fails.
    pub fn to_json(&self, layout: &WorkflowLayout) -> Result<String, LaneflowError> {
        serde_json::to_string_pretty(layout).map_err(|err| LaneflowError::Export(err.to_string()))
    }
}
