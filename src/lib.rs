//! Linear undo/redo history.
//!
//! A [`HistoryManager`] owns every recorded [`Action`] on one of two stacks
//! and moves it between them as the caller undoes and redoes. Recording a
//! new action throws away everything that could have been redone.

pub mod action;
pub mod clock;
pub mod command;
pub mod config;
pub mod diff;
pub mod document;
pub mod history;
pub mod session;

pub use action::{Action, ActionError, EditAction, TypingAction};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use document::Document;
pub use history::{HistoryError, HistoryManager, JumpError, Step};
