use crate::clock::{Clock, Timestamp};
use crate::document::Document;

use super::{Action, ActionError, ActionMeta};

/// Text typed at the end of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingAction {
    text: String,
    meta: ActionMeta,
}

impl TypingAction {
    pub fn new(text: impl Into<String>, clock: &dyn Clock) -> Self {
        let text = text.into();
        let meta = ActionMeta::new(format!("Typed: {}", text), clock);
        Self { text, meta }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Action for TypingAction {
    type Target = Document;

    fn apply(&self, doc: &mut Document) -> Result<(), ActionError> {
        doc.append(&self.text);
        Ok(())
    }

    fn reverse(&self, doc: &mut Document) -> Result<(), ActionError> {
        doc.remove_suffix(&self.text)
    }

    fn description(&self) -> &str {
        self.meta.description()
    }

    fn created_at(&self) -> Timestamp {
        self.meta.created_at()
    }
}
