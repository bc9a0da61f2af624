use std::fmt;

use thiserror::Error;

use crate::clock::{Clock, Timestamp};

pub mod edit;
pub mod typing;

pub use edit::EditAction;
pub use typing::TypingAction;

/// Failure inside a concrete action's forward or inverse effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("document does not end with {expected:?}")]
    MissingSuffix { expected: String },
    #[error("document text is {found:?}, expected {expected:?}")]
    TextMismatch { expected: String, found: String },
}

/// A reversible unit of work.
///
/// `reverse` must restore exactly the state observed before the matching
/// `apply`; the history relies on this to walk back and forth.
pub trait Action: fmt::Debug {
    /// The state the action mutates
    type Target: ?Sized;

    fn apply(&self, target: &mut Self::Target) -> Result<(), ActionError>;
    fn reverse(&self, target: &mut Self::Target) -> Result<(), ActionError>;
    fn description(&self) -> &str;
    fn created_at(&self) -> Timestamp;
}

impl<A: Action + ?Sized> Action for Box<A> {
    type Target = A::Target;

    fn apply(&self, target: &mut Self::Target) -> Result<(), ActionError> {
        (**self).apply(target)
    }

    fn reverse(&self, target: &mut Self::Target) -> Result<(), ActionError> {
        (**self).reverse(target)
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn created_at(&self) -> Timestamp {
        (**self).created_at()
    }
}

/// Identity shared by every concrete action, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMeta {
    description: String,
    created_at: Timestamp,
}

impl ActionMeta {
    pub fn new(description: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            description: description.into(),
            created_at: clock.now(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
