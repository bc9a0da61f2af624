use crate::clock::{Clock, Timestamp};
use crate::diff::{compute_diff, DiffKind};
use crate::document::Document;

use super::{Action, ActionError, ActionMeta};

/// Whole-text transition from `before` to `after`, described by its diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAction {
    before: String,
    after: String,
    kind: DiffKind,
    meta: ActionMeta,
}

impl EditAction {
    pub fn new(before: impl Into<String>, after: impl Into<String>, clock: &dyn Clock) -> Self {
        let before = before.into();
        let after = after.into();
        let diff = compute_diff(&before, &after);
        Self {
            before,
            after,
            kind: diff.kind,
            meta: ActionMeta::new(diff.description, clock),
        }
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn after(&self) -> &str {
        &self.after
    }
}

impl Action for EditAction {
    type Target = Document;

    fn apply(&self, doc: &mut Document) -> Result<(), ActionError> {
        doc.replace(&self.before, &self.after)
    }

    fn reverse(&self, doc: &mut Document) -> Result<(), ActionError> {
        doc.replace(&self.after, &self.before)
    }

    fn description(&self) -> &str {
        self.meta.description()
    }

    fn created_at(&self) -> Timestamp {
        self.meta.created_at()
    }
}
