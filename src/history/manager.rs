use std::marker::PhantomData;
use std::num::NonZeroUsize;

use tracing::{debug, info, trace, warn};

use crate::action::Action;
use crate::config::HistoryConfig;

use super::stack::{DequeStack, Stack};
use super::{Entry, EntryView, HistoryError, HistorySnapshot, JumpError, Step};

/// Linear undo/redo history over two stacks.
///
/// Every entry on the undo stack has been applied; every entry on the redo
/// stack has been reversed. Recording a new action empties the redo stack.
#[derive(Debug)]
pub struct HistoryManager<A, S = DequeStack<Entry<A>>> {
    undo_stack: S,
    redo_stack: S,
    max_depth: Option<NonZeroUsize>,
    _action: PhantomData<fn() -> A>,
}

impl<A: Action> HistoryManager<A> {
    pub fn new() -> Self {
        Self::with_stacks(DequeStack::new(), DequeStack::new())
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        let mut history = Self::new();
        history.max_depth = config.max_depth;
        history
    }
}

impl<A: Action> Default for HistoryManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action, S: Stack<Entry<A>>> HistoryManager<A, S> {
    /// Build a history over caller-supplied containers; both are cleared first
    pub fn with_stacks(mut undo_stack: S, mut redo_stack: S) -> Self {
        undo_stack.clear();
        redo_stack.clear();
        Self {
            undo_stack,
            redo_stack,
            max_depth: None,
            _action: PhantomData,
        }
    }

    /// Apply `action` and push it onto the undo stack, discarding every redoable entry.
    ///
    /// If the action fails to apply nothing is recorded and the redo stack is left intact.
    pub fn record(&mut self, action: A, target: &mut A::Target) -> Result<(), HistoryError> {
        if let Err(source) = action.apply(target) {
            warn!(description = action.description(), error = %source, "action failed, not recorded");
            return Err(HistoryError::Apply {
                description: action.description().to_string(),
                source,
            });
        }

        debug!(
            description = action.description(),
            discarded = self.redo_stack.len(),
            "recorded action"
        );
        self.redo_stack.clear();
        self.undo_stack.push(Entry::new(action));
        self.enforce_max_depth();
        Ok(())
    }

    /// Reverse the most recent action and make it redoable.
    ///
    /// A failed reverse leaves the action on top of the undo stack.
    pub fn undo(&mut self, target: &mut A::Target) -> Result<Step, HistoryError> {
        let entry = match self.undo_stack.pop() {
            Some(entry) => entry,
            None => {
                info!("nothing to undo");
                return Ok(Step::NothingToUndo);
            }
        };

        if let Err(source) = entry.action().reverse(target) {
            let description = entry.action().description().to_string();
            warn!(%description, error = %source, "undo failed, action kept on undo stack");
            self.undo_stack.push(entry);
            return Err(HistoryError::Reverse { description, source });
        }

        debug!(description = entry.action().description(), "undid action");
        self.redo_stack.push(entry);
        Ok(Step::Reversed)
    }

    /// Re-apply the most recently undone action.
    ///
    /// A failed apply leaves the action on top of the redo stack.
    pub fn redo(&mut self, target: &mut A::Target) -> Result<Step, HistoryError> {
        let entry = match self.redo_stack.pop() {
            Some(entry) => entry,
            None => {
                info!("nothing to redo");
                return Ok(Step::NothingToRedo);
            }
        };

        if let Err(source) = entry.action().apply(target) {
            let description = entry.action().description().to_string();
            warn!(%description, error = %source, "redo failed, action kept on redo stack");
            self.redo_stack.push(entry);
            return Err(HistoryError::Apply { description, source });
        }

        debug!(description = entry.action().description(), "redid action");
        self.undo_stack.push(entry);
        self.enforce_max_depth();
        Ok(Step::Reapplied)
    }

    /// Undo until only `index + 1` entries remain (0 = oldest). Returns steps taken.
    ///
    /// If an undo fails the jump stops there; the error carries the steps
    /// already taken, which stay applied to `target`.
    pub fn jump_to_undo(&mut self, index: usize, target: &mut A::Target) -> Result<usize, JumpError> {
        self.undo_while(index.saturating_add(1), target)
    }

    /// Undo every entry. Returns steps taken, with the same partial-failure
    /// reporting as `jump_to_undo`.
    pub fn rewind(&mut self, target: &mut A::Target) -> Result<usize, JumpError> {
        self.undo_while(0, target)
    }

    /// Redo `index + 1` times (0 = next redo), stopping when the redo stack runs out.
    ///
    /// If a redo fails the jump stops there; the error carries the steps
    /// already taken.
    pub fn jump_to_redo(&mut self, index: usize, target: &mut A::Target) -> Result<usize, JumpError> {
        let mut steps = 0;
        for _ in 0..=index {
            match self.redo(target) {
                Ok(Step::Reapplied) => steps += 1,
                Ok(_) => break,
                Err(source) => return Err(JumpError { steps, source }),
            }
        }
        Ok(steps)
    }

    fn undo_while(&mut self, keep: usize, target: &mut A::Target) -> Result<usize, JumpError> {
        let mut steps = 0;
        while self.undo_stack.len() > keep {
            if let Err(source) = self.undo(target) {
                return Err(JumpError { steps, source });
            }
            steps += 1;
        }
        Ok(steps)
    }

    /// Toggle the snapshot marker on the newest undo entry.
    /// Returns the new marker state, or `None` if there is nothing to mark.
    pub fn mark_snapshot(&mut self) -> Option<bool> {
        let marked = self.undo_stack.peek_mut()?.toggle_snapshot();
        debug!(marked, "toggled snapshot marker");
        Some(marked)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Peek at the next action to undo
    pub fn peek_undo(&self) -> Option<&A> {
        self.undo_stack.peek().map(Entry::action)
    }

    /// Peek at the next action to redo
    pub fn peek_redo(&self) -> Option<&A> {
        self.redo_stack.peek().map(Entry::action)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> Option<NonZeroUsize> {
        self.max_depth
    }

    /// Change the undo capacity, evicting the oldest entries if already over it
    pub fn set_max_depth(&mut self, max_depth: Option<NonZeroUsize>) {
        self.max_depth = max_depth;
        self.enforce_max_depth();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            undo: Self::views(&self.undo_stack),
            redo: Self::views(&self.redo_stack),
        }
    }

    fn views(stack: &S) -> Vec<EntryView> {
        (0..stack.len())
            .filter_map(|idx| stack.get(idx))
            .map(Entry::view)
            .collect()
    }

    fn enforce_max_depth(&mut self) {
        let max = match self.max_depth {
            Some(max) => max.get(),
            None => return,
        };
        while self.undo_stack.len() > max {
            match self.undo_stack.pop_bottom() {
                Some(evicted) => {
                    trace!(description = evicted.action().description(), "evicted oldest action");
                }
                None => break,
            }
        }
    }
}
