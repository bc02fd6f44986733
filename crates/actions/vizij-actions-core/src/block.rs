//! Declarative block builder.
//!
//! A [`Block`] collects an ordered list of [`Runnable`]s. Conditionals and
//! loops evaluate eagerly into a fresh nested block whose items are appended
//! in place, so nesting composes by concatenation at every level:
//!
//! ```
//! use vizij_actions_core::{fade_in, remove, wait, Block, Sequence, ActionError};
//!
//! let block = Block::new()
//!     .add(fade_in(1.0)?)
//!     .add_if(false, |b| Ok::<_, ActionError>(b.add(wait(1.0)?)))?
//!     .add(remove());
//! assert_eq!(block.len(), 2);
//! let _seq = Sequence::from_block(block);
//! # Ok::<(), ActionError>(())
//! ```

use crate::action::Action;
use crate::runnable::{Runnable, ToAction};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    items: Vec<Runnable>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append exactly one element.
    pub fn add(mut self, item: impl Into<Runnable>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Append the result of a fallible leaf constructor.
    pub fn try_add<R, E>(self, item: Result<R, E>) -> Result<Self, E>
    where
        R: Into<Runnable>,
    {
        Ok(self.add(item?))
    }

    /// Append the elements of `then` when `condition` holds; nothing otherwise.
    pub fn add_if<E>(
        self,
        condition: bool,
        then: impl FnOnce(Block) -> Result<Block, E>,
    ) -> Result<Self, E> {
        if condition {
            Ok(self.extend_block(then(Block::new())?))
        } else {
            Ok(self)
        }
    }

    /// Append the elements of whichever branch `condition` selects.
    pub fn add_if_else<E>(
        self,
        condition: bool,
        then: impl FnOnce(Block) -> Result<Block, E>,
        otherwise: impl FnOnce(Block) -> Result<Block, E>,
    ) -> Result<Self, E> {
        let branch = if condition {
            then(Block::new())?
        } else {
            otherwise(Block::new())?
        };
        Ok(self.extend_block(branch))
    }

    /// Append, in iteration order, the elements each item's block produces.
    pub fn add_each<T, E>(
        mut self,
        items: impl IntoIterator<Item = T>,
        mut per_item: impl FnMut(Block, T) -> Result<Block, E>,
    ) -> Result<Self, E> {
        for item in items {
            let nested = per_item(Block::new(), item)?;
            self.items.extend(nested.items);
        }
        Ok(self)
    }

    pub fn extend_block(mut self, other: Block) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn runnables(&self) -> &[Runnable] {
        &self.items
    }

    pub fn into_runnables(self) -> Vec<Runnable> {
        self.items
    }

    /// Render every element, preserving order.
    pub fn into_actions(self) -> Vec<Action> {
        self.items.iter().map(ToAction::to_action).collect()
    }
}

impl<R: Into<Runnable>> FromIterator<R> for Block {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<R: Into<Runnable>> Extend<R> for Block {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}
