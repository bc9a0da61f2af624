use crate::action::ActionError;

/// Plain text buffer edited by the built-in actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new() -> Self {
        Self { text: String::new() }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    /// Remove `fragment` from the end of the text, failing if it isn't there
    pub fn remove_suffix(&mut self, fragment: &str) -> Result<(), ActionError> {
        if !self.text.ends_with(fragment) {
            return Err(ActionError::MissingSuffix {
                expected: fragment.to_string(),
            });
        }
        let keep = self.text.len() - fragment.len();
        self.text.truncate(keep);
        Ok(())
    }

    /// Swap the whole text for `replacement`, provided it currently equals `expected`
    pub fn replace(&mut self, expected: &str, replacement: &str) -> Result<(), ActionError> {
        if self.text != expected {
            return Err(ActionError::TextMismatch {
                expected: expected.to_string(),
                found: self.text.clone(),
            });
        }
        self.text.clear();
        self.text.push_str(replacement);
        Ok(())
    }
}
