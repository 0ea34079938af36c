//! Row actions and delete confirmation values.
//!
//! # Responsibility
//! - Name the per-row actions and map button titles to them.
//! - Describe the confirmation prompt and the decision it yields.
//!
//! # Invariants
//! - Titles are the only dispatch key; parsing ignores ASCII case and
//!   surrounding whitespace.

use crate::model::note::Note;
use std::str::FromStr;

pub const DELETE_PROMPT_TITLE: &str = "Delete For Sure?";
pub const DELETE_PROMPT_SUBTITLE: &str = "There is no way to recover it.";

/// Swipe action offered on each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Share,
    Delete,
}

impl RowAction {
    /// Actions in the order they are offered.
    pub const ALL: [RowAction; 2] = [RowAction::Share, RowAction::Delete];

    pub fn title(self) -> &'static str {
        match self {
            Self::Share => "Share",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for RowAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.title().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| normalized.to_string())
    }
}

/// Answer to the delete confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Confirm,
    Cancel,
}

impl DeleteDecision {
    /// Button title bound to this decision.
    pub fn button_title(self) -> &'static str {
        match self {
            Self::Confirm => "Delete",
            Self::Cancel => "Don't Delete",
        }
    }
}

impl FromStr for DeleteDecision {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        [Self::Cancel, Self::Confirm]
            .into_iter()
            .find(|decision| decision.button_title().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| normalized.to_string())
    }
}

/// Modal prompt shown before a row is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Button titles, cancel first.
    pub buttons: [&'static str; 2],
}

impl ConfirmationPrompt {
    pub fn delete() -> Self {
        Self {
            title: DELETE_PROMPT_TITLE,
            subtitle: DELETE_PROMPT_SUBTITLE,
            buttons: [
                DeleteDecision::Cancel.button_title(),
                DeleteDecision::Confirm.button_title(),
            ],
        }
    }
}

/// Plain text handed to the share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub text: String,
}

/// Result of dispatching a row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActionOutcome {
    Share(SharePayload),
    ConfirmDelete(ConfirmationPrompt),
}

/// Result of resolving a pending delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The pending row was removed; `saved` reports the archive write.
    Deleted { note: Note, saved: bool },
    /// The user kept the note.
    Cancelled,
    /// No delete was awaiting confirmation.
    NothingPending,
}
