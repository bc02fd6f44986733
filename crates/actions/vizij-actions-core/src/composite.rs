//! Sequence, Group and Repeat combinators.
//!
//! Children are rendered to [`Action`]s when the composite is built; later
//! changes to the original runnables can't reach the composite.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::block::Block;
use crate::runnable::ToAction;

/// How many times a repeat runs its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    Times(u32),
    /// Runs until the host removes it (by key, or by detaching the node).
    Forever,
}

/// Children run one after another; duration is the sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    actions: Vec<Action>,
}

impl Sequence {
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn from_block(block: Block) -> Self {
        Self::from_actions(block.into_actions())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl ToAction for Sequence {
    fn to_action(&self) -> Action {
        Action::sequence(self.actions.clone())
    }
}

/// Children start together; duration is the longest child.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    actions: Vec<Action>,
}

impl Group {
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn from_block(block: Block) -> Self {
        Self::from_actions(block.into_actions())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl ToAction for Group {
    fn to_action(&self) -> Action {
        Action::group(self.actions.clone())
    }
}

/// Runs its children (as one sequence) `count` times.
#[derive(Clone, Debug, PartialEq)]
pub struct Repeat {
    count: RepeatCount,
    actions: Vec<Action>,
}

impl Repeat {
    pub fn from_actions(count: RepeatCount, actions: Vec<Action>) -> Self {
        Self { count, actions }
    }

    pub fn from_block(count: RepeatCount, block: Block) -> Self {
        Self::from_actions(count, block.into_actions())
    }

    pub fn times(n: u32, actions: Vec<Action>) -> Self {
        Self::from_actions(RepeatCount::Times(n), actions)
    }

    pub fn forever(actions: Vec<Action>) -> Self {
        Self::from_actions(RepeatCount::Forever, actions)
    }

    pub fn count(&self) -> RepeatCount {
        self.count
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl ToAction for Repeat {
    fn to_action(&self) -> Action {
        // a lone child is repeated as-is
        let body = match self.actions.as_slice() {
            [only] => only.clone(),
            _ => Action::sequence(self.actions.clone()),
        };
        Action::repeat(self.count, body)
    }
}

/// Build a [`Sequence`] from a block closure.
pub fn sequence<E>(build: impl FnOnce(Block) -> Result<Block, E>) -> Result<Sequence, E> {
    Ok(Sequence::from_block(build(Block::new())?))
}

/// Build a [`Group`] from a block closure.
pub fn group<E>(build: impl FnOnce(Block) -> Result<Block, E>) -> Result<Group, E> {
    Ok(Group::from_block(build(Block::new())?))
}

/// Build a [`Repeat`] from a block closure.
pub fn repeat<E>(
    count: RepeatCount,
    build: impl FnOnce(Block) -> Result<Block, E>,
) -> Result<Repeat, E> {
    Ok(Repeat::from_block(count, build(Block::new())?))
}
