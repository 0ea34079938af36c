//! Note list store.
//!
//! # Responsibility
//! - Own the ordered in-memory note list for one screen session.
//! - Apply user actions and persist the full list after each of them.
//! - Decide insert-vs-promote when the editor returns a note.
//!
//! # Invariants
//! - User actions always mutate first and persist second.
//! - Index-taking operations never mutate on an out-of-range index.
//! - Archive failures never escape: load falls back to samples, save reports `false`.

use crate::logging::text_shape;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::model::sample::sample_notes;
use crate::repo::note_archive::NoteArchive;
use crate::service::row_action::{
    ConfirmationPrompt, DeleteDecision, DeleteOutcome, RowAction, RowActionOutcome, SharePayload,
};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-level error for list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListError {
    /// Row index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Row action name not present in the dispatch table.
    UnknownAction(String),
    /// Note text failed validation.
    InvalidNote(NoteValidationError),
}

impl Display for NoteListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "row index {index} out of range for {len} note(s)")
            }
            Self::UnknownAction(name) => write!(f, "unknown row action `{name}`"),
            Self::InvalidNote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for NoteListError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidNote(value)
    }
}

/// Value carried back from the editor screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorResult {
    /// The editor was opened from the add button.
    Created(Note),
    /// The editor was opened from the row at `index`.
    Edited { note: Note, index: usize },
}

/// What merging a returned note did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A new note was placed at the top.
    Inserted,
    /// The row at `from` was replaced by the edited note at the top.
    Promoted { from: usize },
    /// Text was unchanged; the list was left alone.
    Unchanged,
}

/// Outcome of applying an editor result, including the save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOutcome {
    pub merge: MergeOutcome,
    /// `None` when nothing changed and no save was attempted.
    pub saved: Option<bool>,
}

/// Ordered note list bound to an archive.
pub struct NoteList<A: NoteArchive> {
    archive: A,
    notes: Vec<Note>,
    /// Note awaiting delete confirmation, tracked by id so list changes
    /// in between cannot retarget it.
    pending_delete: Option<NoteId>,
}

impl<A: NoteArchive> NoteList<A> {
    /// Opens the list from `archive`, falling back to sample notes.
    ///
    /// Samples are not written back until the first user action.
    pub fn open(archive: A) -> Self {
        let notes = match load_notes(&archive) {
            Some(notes) => notes,
            None => {
                info!("event=notes_open module=service status=ok source=samples");
                sample_notes()
            }
        };
        Self::with_notes(archive, notes)
    }

    /// Builds a list from explicit contents without touching the archive.
    pub fn with_notes(archive: A, notes: Vec<Note>) -> Self {
        Self {
            archive,
            notes,
            pending_delete: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Screen title, e.g. `"3 Notes"`.
    pub fn title(&self) -> String {
        format!("{} Notes", self.notes.len())
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    /// Current row of the note awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete.and_then(|id| self.position_of(id))
    }

    /// Row of the note with `id`, if it is still listed.
    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Prepends `note`. Does not persist.
    pub fn insert_at_top(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Removes and returns the note at `index`. Does not persist.
    pub fn remove_at(&mut self, index: usize) -> Result<Note, NoteListError> {
        self.check_index(index)?;
        Ok(self.notes.remove(index))
    }

    /// Relocates the note at `from` to position `to`. Does not persist.
    pub fn move_note(&mut self, from: usize, to: usize) -> Result<(), NoteListError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let note = self.notes.remove(from);
        self.notes.insert(to, note);
        Ok(())
    }

    /// Merges an edited note returned for the row at `original_index`.
    ///
    /// Changed text removes the old row and puts `edited` on top; identical
    /// text leaves the list untouched. Does not persist.
    pub fn merge_on_edit(
        &mut self,
        edited: Note,
        original_index: usize,
    ) -> Result<MergeOutcome, NoteListError> {
        self.check_index(original_index)?;
        if self.notes[original_index].entry == edited.entry {
            return Ok(MergeOutcome::Unchanged);
        }
        self.notes.remove(original_index);
        self.notes.insert(0, edited);
        Ok(MergeOutcome::Promoted {
            from: original_index,
        })
    }

    /// Writes the full list to the archive. Failures are logged, not raised.
    pub fn save(&self) -> bool {
        save_notes(&self.archive, &self.notes)
    }

    /// Creates a note from `text`, puts it on top and persists.
    ///
    /// Returns the archive write result.
    ///
    /// # Errors
    /// - `InvalidNote` when `text` is empty; the list is unchanged.
    pub fn add_note(&mut self, text: impl Into<String>) -> Result<bool, NoteListError> {
        let note = Note::new(text)?;
        debug!(
            "event=notes_add module=service status=ok {} count={}",
            text_shape(&note.entry),
            self.notes.len() + 1
        );
        self.insert_at_top(note);
        Ok(self.save())
    }

    /// Applies the editor's return value, persisting when the list changed.
    pub fn apply_editor_result(
        &mut self,
        result: EditorResult,
    ) -> Result<EditorOutcome, NoteListError> {
        let merge = match result {
            EditorResult::Created(note) => {
                self.insert_at_top(note);
                MergeOutcome::Inserted
            }
            EditorResult::Edited { note, index } => self.merge_on_edit(note, index)?,
        };

        let saved = match merge {
            MergeOutcome::Unchanged => None,
            _ => Some(self.save()),
        };
        debug!(
            "event=notes_editor_return module=service status=ok outcome={:?} count={}",
            merge,
            self.notes.len()
        );
        Ok(EditorOutcome { merge, saved })
    }

    /// Drag-to-reorder: moves the row and persists.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, NoteListError> {
        self.move_note(from, to)?;
        Ok(self.save())
    }

    /// Text of the note at `index`, unchanged, for sharing.
    pub fn share_text(&self, index: usize) -> Result<&str, NoteListError> {
        self.check_index(index)?;
        Ok(self.notes[index].entry.as_str())
    }

    /// Dispatches a row action for the row at `index`.
    ///
    /// Delete only records the note; removal happens in [`NoteList::resolve_delete`].
    pub fn perform_row_action(
        &mut self,
        action: RowAction,
        index: usize,
    ) -> Result<RowActionOutcome, NoteListError> {
        self.check_index(index)?;
        match action {
            RowAction::Share => Ok(RowActionOutcome::Share(SharePayload {
                text: self.notes[index].entry.clone(),
            })),
            RowAction::Delete => {
                self.pending_delete = Some(self.notes[index].id);
                Ok(RowActionOutcome::ConfirmDelete(ConfirmationPrompt::delete()))
            }
        }
    }

    /// Same as [`NoteList::perform_row_action`], keyed by action title.
    pub fn perform_named_action(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<RowActionOutcome, NoteListError> {
        let action = name.parse::<RowAction>().map_err(NoteListError::UnknownAction)?;
        self.perform_row_action(action, index)
    }

    /// Resolves the pending delete with the user's decision.
    ///
    /// The pending note is cleared in every case. A note that left the list
    /// since Delete was tapped resolves as `NothingPending`.
    pub fn resolve_delete(
        &mut self,
        decision: DeleteDecision,
    ) -> Result<DeleteOutcome, NoteListError> {
        let Some(index) = self.pending_delete.take().and_then(|id| self.position_of(id)) else {
            return Ok(DeleteOutcome::NothingPending);
        };

        match decision {
            DeleteDecision::Cancel => Ok(DeleteOutcome::Cancelled),
            DeleteDecision::Confirm => {
                let note = self.remove_at(index)?;
                let saved = self.save();
                info!(
                    "event=notes_delete module=service status=ok index={} count={} saved={}",
                    index,
                    self.notes.len(),
                    saved
                );
                Ok(DeleteOutcome::Deleted { note, saved })
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), NoteListError> {
        if index < self.notes.len() {
            Ok(())
        } else {
            Err(NoteListError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            })
        }
    }
}

/// Reads the archive, treating a missing file and a failed decode alike.
pub fn load_notes<A: NoteArchive>(archive: &A) -> Option<Vec<Note>> {
    match archive.load() {
        Ok(found) => found,
        Err(err) => {
            warn!(
                "event=notes_load module=service status=error fallback=samples error={}",
                err
            );
            None
        }
    }
}

/// Writes `notes` to the archive and reports success.
pub fn save_notes<A: NoteArchive>(archive: &A, notes: &[Note]) -> bool {
    match archive.save(notes) {
        Ok(()) => true,
        Err(err) => {
            error!(
                "event=notes_save module=service status=error count={} error={}",
                notes.len(),
                err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteList, NoteListError};
    use crate::model::note::Note;
    use crate::service::row_action::{DeleteDecision, DeleteOutcome, RowAction};
    use crate::repo::note_archive::MemoryNoteArchive;

    fn list_of(entries: &[&str]) -> NoteList<MemoryNoteArchive> {
        let notes = entries
            .iter()
            .map(|entry| Note::new(*entry).unwrap())
            .collect();
        NoteList::with_notes(MemoryNoteArchive::new(), notes)
    }

    fn entries<A: crate::NoteArchive>(list: &NoteList<A>) -> Vec<&str> {
        list.notes().iter().map(|note| note.entry.as_str()).collect()
    }

    #[test]
    fn move_note_relocates_row() {
        let mut list = list_of(&["A", "B", "C"]);
        list.move_note(0, 2).unwrap();
        assert_eq!(entries(&list), vec!["B", "C", "A"]);
        list.move_note(2, 0).unwrap();
        assert_eq!(entries(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn move_note_rejects_destination_past_end() {
        let mut list = list_of(&["A", "B"]);
        let err = list.move_note(0, 2).unwrap_err();
        assert_eq!(err, NoteListError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(entries(&list), vec!["A", "B"]);
    }

    #[test]
    fn move_note_rejects_source_past_end() {
        let mut list = list_of(&["A", "B"]);
        let err = list.move_note(5, 0).unwrap_err();
        assert_eq!(err, NoteListError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(entries(&list), vec!["A", "B"]);
    }

    #[test]
    fn confirmed_delete_follows_note_after_insert() {
        let mut list = list_of(&["A", "B", "C"]);
        list.perform_row_action(RowAction::Delete, 1).unwrap();
        list.add_note("NEW").unwrap();
        assert_eq!(list.pending_delete(), Some(2));

        match list.resolve_delete(DeleteDecision::Confirm).unwrap() {
            DeleteOutcome::Deleted { note, .. } => assert_eq!(note.entry, "B"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(entries(&list), vec!["NEW", "A", "C"]);
    }

    #[test]
    fn confirmed_delete_follows_note_after_reorder() {
        let mut list = list_of(&["A", "B", "C"]);
        list.perform_row_action(RowAction::Delete, 0).unwrap();
        list.reorder(0, 2).unwrap();

        list.resolve_delete(DeleteDecision::Confirm).unwrap();
        assert_eq!(entries(&list), vec!["B", "C"]);
    }

    #[test]
    fn pending_delete_of_removed_row_resolves_to_nothing() {
        let mut list = list_of(&["A", "B", "C"]);
        list.perform_row_action(RowAction::Delete, 2).unwrap();
        list.remove_at(2).unwrap();
        assert_eq!(list.pending_delete(), None);

        assert_eq!(
            list.resolve_delete(DeleteDecision::Confirm).unwrap(),
            DeleteOutcome::NothingPending
        );
        assert_eq!(entries(&list), vec!["A", "B"]);
        assert!(list.archive().document().is_none());
    }

    #[test]
    fn title_counts_rows() {
        assert_eq!(list_of(&["A", "B", "C"]).title(), "3 Notes");
        assert_eq!(list_of(&[]).title(), "0 Notes");
    }
}
