use serde::Serialize;
use thiserror::Error;

use crate::action::{Action, ActionError};
use crate::clock::Timestamp;

pub mod manager;
pub mod stack;

pub use manager::HistoryManager;
pub use stack::{DequeStack, Stack};

/// Result of an undo or redo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The top undo entry was reversed and moved to the redo stack
    Reversed,
    /// The top redo entry was applied again and moved to the undo stack
    Reapplied,
    NothingToUndo,
    NothingToRedo,
}

impl Step {
    pub fn is_noop(&self) -> bool {
        matches!(self, Step::NothingToUndo | Step::NothingToRedo)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Step::Reversed => "Undo",
            Step::Reapplied => "Redo",
            Step::NothingToUndo => "Nothing to undo.",
            Step::NothingToRedo => "Nothing to redo.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("could not apply \"{description}\": {source}")]
    Apply {
        description: String,
        #[source]
        source: ActionError,
    },
    #[error("could not reverse \"{description}\": {source}")]
    Reverse {
        description: String,
        #[source]
        source: ActionError,
    },
}

/// A multi-step jump that failed after `steps` successful steps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stopped after {steps} step(s): {source}")]
pub struct JumpError {
    pub steps: usize,
    #[source]
    pub source: HistoryError,
}

/// A history slot: the owned action and its snapshot marker
#[derive(Debug, Clone)]
pub struct Entry<A> {
    action: A,
    snapshot: bool,
}

impl<A> Entry<A> {
    pub fn new(action: A) -> Self {
        Self { action, snapshot: false }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn into_action(self) -> A {
        self.action
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    /// Flip the marker, returning its new state
    pub fn toggle_snapshot(&mut self) -> bool {
        self.snapshot = !self.snapshot;
        self.snapshot
    }
}

impl<A: Action> Entry<A> {
    pub fn view(&self) -> EntryView {
        let description = self.action.description();
        let label = if self.snapshot {
            format!("★ {}", description)
        } else {
            description.to_string()
        };
        EntryView {
            description: description.to_string(),
            label,
            created_at: self.action.created_at(),
            snapshot: self.snapshot,
        }
    }
}

/// Read-only copy of an entry for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub description: String,
    /// Description with a star in front of snapshot entries
    pub label: String,
    pub created_at: Timestamp,
    pub snapshot: bool,
}

/// Both stacks, listed bottom to top
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub undo: Vec<EntryView>,
    pub redo: Vec<EntryView>,
}

impl HistorySnapshot {
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
