//! Memoization of the last computed layout.
//!
//! An editor recomputes the layout whenever the actor or step list changes, but
//! redraws far more often than that. [`LayoutMemo`] keeps the most recent result
//! and recomputes only when the inputs or the configuration differ from the ones
//! that produced it. The layout function itself holds no state.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use log::debug;

use laneflow_core::model::{Actor, Step};

use crate::{
    config::LayoutConfig,
    layout::{self, WorkflowLayout},
};

#[derive(Debug)]
struct Entry {
    input_hash: u64,
    actors: Vec<Actor>,
    steps: Vec<Step>,
    config: LayoutConfig,
    layout: WorkflowLayout,
}

impl Entry {
    /// The hash only rules entries out; equal hashes are confirmed field by field.
    fn matches(
        &self,
        input_hash: u64,
        actors: &[Actor],
        steps: &[Step],
        config: &LayoutConfig,
    ) -> bool {
        self.input_hash == input_hash
            && self.config == *config
            && self.actors == actors
            && self.steps == steps
    }
}

/// Single-entry cache in front of [`layout::compute`].
///
/// # Examples
///
/// ```
/// # use laneflow::{config::LayoutConfig, layout::memo::LayoutMemo};
/// # use laneflow::model::{Actor, Step, StepKind};
/// let actors = vec![Actor::new("a0", "Clerk", "Records")];
/// let steps = vec![Step::new("s1", StepKind::Process, "Receive request")];
/// let config = LayoutConfig::default();
///
/// let mut memo = LayoutMemo::new();
/// memo.get_or_compute(&actors, &steps, &config);
/// memo.get_or_compute(&actors, &steps, &config);
/// assert_eq!(memo.computations(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LayoutMemo {
    entry: Option<Entry>,
    computations: usize,
}

impl LayoutMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached layout, recomputing it if the inputs changed.
    pub fn get_or_compute(
        &mut self,
        actors: &[Actor],
        steps: &[Step],
        config: &LayoutConfig,
    ) -> &WorkflowLayout {
        let input_hash = hash_inputs(actors, steps);

        let entry = match self.entry.take() {
            Some(entry) if entry.matches(input_hash, actors, steps, config) => {
                debug!(input_hash; "Reusing memoized layout");
                entry
            }
            _ => {
                debug!(input_hash; "Workflow input changed, recomputing layout");
                self.computations += 1;
                Entry {
                    input_hash,
                    actors: actors.to_vec(),
                    steps: steps.to_vec(),
                    config: config.clone(),
                    layout: layout::compute(actors, steps, config),
                }
            }
        };

        &self.entry.insert(entry).layout
    }

    /// Number of times the layout was actually computed
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Drops the cached layout
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

fn hash_inputs(actors: &[Actor], steps: &[Step]) -> u64 {
    let mut hasher = DefaultHasher::new();
    actors.hash(&mut hasher);
    steps.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use laneflow_core::model::StepKind;

    use super::*;
    use crate::config::LayoutEngine;

    fn inputs() -> (Vec<Actor>, Vec<Step>) {
        (
            vec![Actor::new("a0", "Clerk", "Records")],
            vec![
                Step::new("s1", StepKind::Process, "Receive").with_actor("a0"),
                Step::new("s2", StepKind::Document, "Issue").with_actor("a0"),
            ],
        )
    }

    #[test]
    fn test_unchanged_input_is_reused() {
        let (actors, steps) = inputs();
        let config = LayoutConfig::default();
        let mut memo = LayoutMemo::new();

        let first = memo.get_or_compute(&actors, &steps, &config).clone();
        let second = memo.get_or_compute(&actors, &steps, &config).clone();

        assert_eq!(first, second);
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_changed_steps_recompute() {
        let (actors, mut steps) = inputs();
        let config = LayoutConfig::default();
        let mut memo = LayoutMemo::new();

        memo.get_or_compute(&actors, &steps, &config);
        steps.push(Step::new("s3", StepKind::System, "Notify"));
        let layout = memo.get_or_compute(&actors, &steps, &config);

        assert_eq!(layout.nodes().len(), 5);
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn test_equal_hash_with_different_input_recomputes() {
        let (actors, steps) = inputs();
        let config = LayoutConfig::default();
        let other_steps = vec![Step::new("x", StepKind::Process, "Other")];

        // Plant an entry whose hash claims to match inputs it was not built from.
        let mut memo = LayoutMemo {
            entry: Some(Entry {
                input_hash: hash_inputs(&actors, &steps),
                actors: actors.clone(),
                steps: other_steps.clone(),
                config: config.clone(),
                layout: layout::compute(&actors, &other_steps, &config),
            }),
            computations: 0,
        };

        let layout = memo.get_or_compute(&actors, &steps, &config);

        assert_eq!(layout.nodes().len(), 4);
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_changed_config_recomputes() {
        let (actors, steps) = inputs();
        let mut config = LayoutConfig::default();
        let mut memo = LayoutMemo::new();

        memo.get_or_compute(&actors, &steps, &config);
        config.set_engine(LayoutEngine::Basic);
        memo.get_or_compute(&actors, &steps, &config);
        memo.clear();
        memo.get_or_compute(&actors, &steps, &config);

        assert_eq!(memo.computations(), 3);
    }
}
