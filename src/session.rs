use thiserror::Error;
use tracing::debug;

use crate::action::{Action, EditAction, TypingAction};
use crate::clock::Clock;
use crate::command::{Command, ParseError};
use crate::config::Config;
use crate::document::Document;
use crate::history::{HistoryError, HistoryManager, JumpError, Step};

/// The scenario run when no script is given
pub const DEMO_SCRIPT: &str = "\
# user types two fragments, then steps back and forth
type Hello
type  World
undo
redo
show
";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Jump(#[from] JumpError),
    #[error("failed to render history: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: SessionError,
}

pub type DocumentAction = Box<dyn Action<Target = Document>>;

/// One editing session: a document, its history and the clock stamping new actions
pub struct Session {
    document: Document,
    history: HistoryManager<DocumentAction>,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(config: &Config, clock: Box<dyn Clock>) -> Self {
        Self {
            document: Document::new(),
            history: HistoryManager::with_config(&config.history),
            clock,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &HistoryManager<DocumentAction> {
        &self.history
    }

    /// Run a command, returning a status line for the user
    pub fn execute(&mut self, cmd: Command) -> Result<String, SessionError> {
        debug!(?cmd, "executing");
        let msg = match cmd {
            Command::Type(text) => {
                let action = TypingAction::new(text, self.clock.as_ref());
                self.record(Box::new(action))?
            }
            Command::Edit(text) => {
                let action = EditAction::new(self.document.text(), text, self.clock.as_ref());
                self.record(Box::new(action))?
            }
            Command::Undo => {
                let description = self.history.peek_undo().map(|a| a.description().to_string());
                let step = self.history.undo(&mut self.document)?;
                step_message(step, description)
            }
            Command::Redo => {
                let description = self.history.peek_redo().map(|a| a.description().to_string());
                let step = self.history.redo(&mut self.document)?;
                step_message(step, description)
            }
            Command::Mark => match self.history.mark_snapshot() {
                Some(true) => "Marked snapshot".to_string(),
                Some(false) => "Unmarked snapshot".to_string(),
                None => "Nothing to mark.".to_string(),
            },
            Command::JumpUndo(idx) => {
                let steps = self.history.jump_to_undo(idx, &mut self.document)?;
                format!("Undid {} action(s)", steps)
            }
            Command::JumpRedo(idx) => {
                let steps = self.history.jump_to_redo(idx, &mut self.document)?;
                format!("Redid {} action(s)", steps)
            }
            Command::Clear => {
                self.history.clear();
                "History cleared".to_string()
            }
            Command::Show => format!(
                "text = {:?}\n{}",
                self.document.text(),
                self.history.snapshot().to_toml()?
            ),
            Command::Replay => self.replay()?,
        };
        Ok(msg)
    }

    /// Rewind to the oldest state, then redo every undoable entry one by one,
    /// listing the text after each step. Entries already on the redo stack stay there.
    fn replay(&mut self) -> Result<String, SessionError> {
        let count = self.history.undo_len();
        self.history.rewind(&mut self.document)?;

        let mut frames = vec![format!("0: {:?}", self.document.text())];
        for step in 1..=count {
            self.history.redo(&mut self.document)?;
            frames.push(format!("{}: {:?}", step, self.document.text()));
        }
        debug!(steps = count, "replayed history");
        Ok(format!("Replay:\n{}", frames.join("\n")))
    }

    /// Parse and run one script line; `line_no` is only used for error reporting
    pub fn run_line(&mut self, line_no: usize, line: &str) -> Result<Option<String>, ScriptError> {
        let wrap = |source: SessionError| ScriptError { line: line_no, source };
        match Command::parse(line).map_err(|e| wrap(e.into()))? {
            Some(cmd) => self.execute(cmd).map(Some).map_err(wrap),
            None => Ok(None),
        }
    }

    /// Run every line of `script`, collecting status lines. Stops at the first error.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<String>, ScriptError> {
        let mut messages = Vec::new();
        for (idx, line) in script.lines().enumerate() {
            if let Some(msg) = self.run_line(idx + 1, line)? {
                messages.push(msg);
            }
        }
        Ok(messages)
    }

    fn record(&mut self, action: DocumentAction) -> Result<String, HistoryError> {
        let description = action.description().to_string();
        self.history.record(action, &mut self.document)?;
        Ok(description)
    }
}

fn step_message(step: Step, description: Option<String>) -> String {
    match (step.is_noop(), description) {
        (false, Some(description)) => format!("{}: {}", step.message(), description),
        _ => step.message().to_string(),
    }
}
