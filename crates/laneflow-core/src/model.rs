//! Caller-supplied workflow model.
//!
//! These are the records a host application keeps for a process: the [`Actor`]s that
//! own swimlanes and the ordered [`Step`]s. The layout engine only reads them.
//!
//! All types deserialize with `serde`. Field aliases accept the column names used
//! by the records the model is usually exported from (`description`, `actor_id`,
//! `sensitive`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// A role or department performing work in the process.
///
/// The position of an actor in its input list is its swimlane rank. `order_index` is
/// carried along for callers but never used to reorder actors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Actor {
    id: Id,
    #[serde(default)]
    title: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    order_index: i32,
}

impl Actor {
    /// Creates an actor with an `order_index` of zero.
    pub fn new(id: impl Into<Id>, title: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            department: department.into(),
            order_index: 0,
        }
    }

    /// Sets the externally assigned ordinal
    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Display title shown in the swimlane header
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn order_index(&self) -> i32 {
        self.order_index
    }
}

/// The kind of a process step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    #[default]
    Process,
    Decision,
    Document,
    System,
}

impl FromStr for StepKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Self::Process),
            "decision" => Ok(Self::Decision),
            "document" => Ok(Self::Document),
            "system" => Ok(Self::System),
            _ => Err("Unsupported step kind"),
        }
    }
}

impl From<StepKind> for &'static str {
    fn from(val: StepKind) -> Self {
        match val {
            StepKind::Process => "process",
            StepKind::Decision => "decision",
            StepKind::Document => "document",
            StepKind::System => "system",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// One node of the process, in default execution order.
///
/// Only decision steps use `yes_target` and `no_target`. Both must name a step in
/// the same list to produce an edge. Anything else is dropped silently during
/// layout.
///
/// # Examples
///
/// ```
/// use laneflow_core::model::{Step, StepKind};
///
/// let check = Step::new("s2", StepKind::Decision, "Complete?")
///     .with_actor("a0")
///     .with_yes_target("s3")
///     .with_no_target("s1");
///
/// assert!(check.is_decision());
/// assert_eq!(check.yes_target().unwrap(), "s3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Step {
    id: Id,
    #[serde(default)]
    kind: StepKind,
    #[serde(default, alias = "description")]
    label: String,
    #[serde(default, alias = "actor_id")]
    actor: Option<Id>,
    #[serde(default, alias = "sensitive")]
    is_sensitive: bool,
    #[serde(default)]
    yes_target: Option<Id>,
    #[serde(default)]
    no_target: Option<Id>,
}

impl Step {
    pub fn new(id: impl Into<Id>, kind: StepKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            actor: None,
            is_sensitive: false,
            yes_target: None,
            no_target: None,
        }
    }

    /// Assigns the owning actor
    pub fn with_actor(mut self, actor: impl Into<Id>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Marks the step as handling sensitive data
    pub fn sensitive(mut self) -> Self {
        self.is_sensitive = true;
        self
    }

    pub fn with_yes_target(mut self, target: impl Into<Id>) -> Self {
        self.yes_target = Some(target.into());
        self
    }

    pub fn with_no_target(mut self, target: impl Into<Id>) -> Self {
        self.no_target = Some(target.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn actor(&self) -> Option<Id> {
        self.actor
    }

    pub fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    pub fn is_decision(&self) -> bool {
        self.kind == StepKind::Decision
    }

    pub fn yes_target(&self) -> Option<Id> {
        self.yes_target
    }

    pub fn no_target(&self) -> Option<Id> {
        self.no_target
    }
}

/// A complete workflow: actors plus ordered steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    actors: Vec<Actor>,
    #[serde(default)]
    steps: Vec<Step>,
}

impl Workflow {
    pub fn new(actors: Vec<Actor>, steps: Vec<Step>) -> Self {
        Self { actors, steps }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
