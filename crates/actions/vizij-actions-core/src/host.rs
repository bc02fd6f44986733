//! Host integration: the single place an action crosses into the engine.
//!
//! Hosts implement [`ActionNode`] for their node type. Timing, interpolation,
//! cancellation and replacement by key all stay on the host side.

use crate::action::Action;
use crate::callback::Callback;
use crate::ids::{ActionKey, NodeHandle};
use crate::runnable::ToAction;

/// A host node that can execute action descriptors.
pub trait ActionNode {
    fn handle(&self) -> &NodeHandle;

    /// Begin executing `action` on this node, tagged with `key` when given.
    fn run_action(&mut self, action: Action, key: Option<ActionKey>);

    /// Render `runnable` and hand it to the host.
    ///
    /// A completion callback is appended as a trailing step of a sequence
    /// wrapping the main action, so it fires only after the main action
    /// (including a finite repeat or a group) has finished.
    fn run(&mut self, runnable: &dyn ToAction, key: Option<&str>, completion: Option<Callback>) {
        let main = runnable.to_action();
        if !main.is_finite() && key.is_none() {
            log::warn!(
                "running an endless {} on '{}' without a key; only detaching the node stops it",
                main.kind_name(),
                self.handle()
            );
        }
        let action = match completion {
            Some(cb) => Action::sequence(vec![main, Action::run(cb)]),
            None => main,
        };
        log::debug!(
            "run {} ({}s) on '{}' key={:?}",
            action.kind_name(),
            action.duration(),
            self.handle(),
            key
        );
        self.run_action(action, key.map(ActionKey::from));
    }
}

/// One run request observed by [`RecordingNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunRecord {
    pub key: Option<ActionKey>,
    pub action: Action,
}

/// Headless node that records run requests instead of executing them.
///
/// Keyed runs replace any earlier run with the same key, as hosts do.
#[derive(Clone, Debug)]
pub struct RecordingNode {
    handle: NodeHandle,
    runs: Vec<RunRecord>,
}

impl RecordingNode {
    pub fn new(handle: impl Into<NodeHandle>) -> Self {
        Self {
            handle: handle.into(),
            runs: Vec::new(),
        }
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn has_actions(&self) -> bool {
        !self.runs.is_empty()
    }

    pub fn action_for_key(&self, key: &str) -> Option<&Action> {
        self.runs
            .iter()
            .find(|r| r.key.as_ref().is_some_and(|k| k.as_str() == key))
            .map(|r| &r.action)
    }

    pub fn remove_action(&mut self, key: &str) -> Option<Action> {
        let idx = self
            .runs
            .iter()
            .position(|r| r.key.as_ref().is_some_and(|k| k.as_str() == key))?;
        Some(self.runs.remove(idx).action)
    }

    pub fn remove_all_actions(&mut self) {
        self.runs.clear();
    }
}

impl ActionNode for RecordingNode {
    fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    fn run_action(&mut self, action: Action, key: Option<ActionKey>) {
        if let Some(k) = &key {
            self.runs.retain(|r| r.key.as_ref() != Some(k));
        }
        self.runs.push(RunRecord { key, action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Effect;
    use crate::error::Result;
    use crate::leaf::{fade_in, wait};

    #[test]
    fn keyed_runs_replace_and_can_be_removed() -> Result<()> {
        let mut node = RecordingNode::new("Hero");
        node.run(&fade_in(1.0)?, Some("intro"), None);
        node.run(&wait(2.0)?, Some("intro"), None);
        node.run(&wait(3.0)?, None, None);

        assert_eq!(node.runs().len(), 2);
        assert_eq!(
            node.action_for_key("intro"),
            Some(&wait(2.0)?.to_action())
        );
        assert_eq!(node.remove_action("intro"), Some(wait(2.0)?.to_action()));
        assert!(node.action_for_key("intro").is_none());
        assert!(node.has_actions());
        Ok(())
    }

    #[test]
    fn no_completion_runs_the_action_unwrapped() -> Result<()> {
        let mut node = RecordingNode::new("Hero");
        node.run(&fade_in(1.0)?, None, None);
        assert!(matches!(node.runs()[0].action.effect(), Effect::Fade(_)));
        Ok(())
    }
}
