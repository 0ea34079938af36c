//! FFI use-case API for the mobile list screen.
//!
//! # Responsibility
//! - Expose list-screen actions to Dart via FRB as sync calls.
//! - Hold the one open note list for the process between calls.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutating call persists before returning.
//! - Indices are zero-based row positions of the last returned snapshot.

use log::warn;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use thoughtless_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DeleteDecision, DeleteOutcome, EditorResult, FileNoteArchive, MergeOutcome, Note, NoteList,
    RowActionOutcome, DATA_DIR_ENV,
};

const DEFAULT_DATA_DIR_NAME: &str = "thoughtless";

static SESSION: Lazy<Mutex<Option<NoteList<FileNoteArchive>>>> = Lazy::new(|| Mutex::new(None));

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub entry: String,
    pub modified: String,
}

/// Snapshot of the list after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Screen title, e.g. `3 Notes`.
    pub title: String,
    /// Rows in display order; empty when no list is open.
    pub items: Vec<NoteItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Result of a swipe action on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionResponse {
    pub ok: bool,
    /// Text for the share sheet (share action only).
    pub share_text: Option<String>,
    /// Prompt title (delete action only).
    pub prompt_title: Option<String>,
    /// Prompt subtitle (delete action only).
    pub prompt_subtitle: Option<String>,
    /// Prompt button titles, cancel first (delete action only).
    pub prompt_buttons: Vec<String>,
    pub message: String,
}

impl RowActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            share_text: None,
            prompt_title: None,
            prompt_subtitle: None,
            prompt_buttons: Vec::new(),
            message: message.into(),
        }
    }
}

/// Opens the note list stored under `data_dir`.
///
/// An empty `data_dir` falls back to `THOUGHTLESS_DATA_DIR`, then to a
/// directory under the system temp dir. Reopening replaces the session.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_open(data_dir: String) -> NotesResponse {
    let dir = resolve_data_dir(data_dir.as_str());
    let list = NoteList::open(FileNoteArchive::in_dir(&dir));
    let mut session = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let response = snapshot(&list, true, "Notes opened.");
    *session = Some(list);
    response
}

/// Returns the current rows.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesResponse {
    with_session("notes_list", |list| Ok(snapshot(list, true, "")))
}

/// Adds a note at the top (editor returned from the add button).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(entry: String) -> NotesResponse {
    with_session("notes_add", |list| {
        let note = Note::new(entry).map_err(|err| err.to_string())?;
        let outcome = list
            .apply_editor_result(EditorResult::Created(note))
            .map_err(|err| err.to_string())?;
        Ok(snapshot(list, true, saved_message("Note added.", outcome.saved)))
    })
}

/// Applies an edit made to the row at `index` (editor returned from a row).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_edit(index: u32, entry: String) -> NotesResponse {
    with_session("notes_edit", |list| {
        let index = index as usize;
        let original = list
            .get(index)
            .ok_or_else(|| format!("row index {index} out of range for {} note(s)", list.len()))?;
        let edited = original.revise(entry).map_err(|err| err.to_string())?;
        let outcome = list
            .apply_editor_result(EditorResult::Edited {
                note: edited,
                index,
            })
            .map_err(|err| err.to_string())?;
        let message = match outcome.merge {
            MergeOutcome::Unchanged => "No changes.",
            _ => "Note updated.",
        };
        Ok(snapshot(list, true, saved_message(message, outcome.saved)))
    })
}

/// Moves a row after drag-to-reorder.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_move(from: u32, to: u32) -> NotesResponse {
    with_session("notes_move", |list| {
        let saved = list
            .reorder(from as usize, to as usize)
            .map_err(|err| err.to_string())?;
        Ok(snapshot(list, true, saved_message("Note moved.", Some(saved))))
    })
}

/// Dispatches a row action by title (`Share` or `Delete`).
///
/// `Delete` only arms the confirmation; call [`notes_resolve_delete`] with the
/// tapped button title to finish.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_row_action(action: String, index: u32) -> RowActionResponse {
    let mut session = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let Some(list) = session.as_mut() else {
        return RowActionResponse::failure("notes_row_action failed: no open note list");
    };

    match list.perform_named_action(action.as_str(), index as usize) {
        Ok(RowActionOutcome::Share(payload)) => RowActionResponse {
            ok: true,
            share_text: Some(payload.text),
            prompt_title: None,
            prompt_subtitle: None,
            prompt_buttons: Vec::new(),
            message: String::new(),
        },
        Ok(RowActionOutcome::ConfirmDelete(prompt)) => RowActionResponse {
            ok: true,
            share_text: None,
            prompt_title: Some(prompt.title.to_string()),
            prompt_subtitle: Some(prompt.subtitle.to_string()),
            prompt_buttons: prompt.buttons.iter().map(|b| b.to_string()).collect(),
            message: String::new(),
        },
        Err(err) => RowActionResponse::failure(format!("notes_row_action failed: {err}")),
    }
}

/// Resolves a pending delete with the tapped prompt button title.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_resolve_delete(button_title: String) -> NotesResponse {
    with_session("notes_resolve_delete", |list| {
        let decision = button_title
            .parse::<DeleteDecision>()
            .map_err(|title| format!("unknown prompt button `{title}`"))?;
        let message = match list.resolve_delete(decision).map_err(|err| err.to_string())? {
            DeleteOutcome::Deleted { saved, .. } => saved_message("Note deleted.", Some(saved)),
            DeleteOutcome::Cancelled => "Delete cancelled.".to_string(),
            DeleteOutcome::NothingPending => "No delete pending.".to_string(),
        };
        Ok(snapshot(list, true, message))
    })
}

fn with_session(
    op: &str,
    f: impl FnOnce(&mut NoteList<FileNoteArchive>) -> Result<NotesResponse, String>,
) -> NotesResponse {
    let mut session = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let Some(list) = session.as_mut() else {
        return NotesResponse {
            ok: false,
            title: String::new(),
            items: Vec::new(),
            message: format!("{op} failed: no open note list"),
        };
    };

    match f(list) {
        Ok(response) => response,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={op}");
            snapshot(list, false, format!("{op} failed: {err}"))
        }
    }
}

fn snapshot(
    list: &NoteList<FileNoteArchive>,
    ok: bool,
    message: impl Into<String>,
) -> NotesResponse {
    NotesResponse {
        ok,
        title: list.title(),
        items: list
            .notes()
            .iter()
            .map(|note| NoteItem {
                id: note.id.to_string(),
                entry: note.entry.clone(),
                modified: note.date_modification_time_stamp.clone(),
            })
            .collect(),
        message: message.into(),
    }
}

fn saved_message(message: &str, saved: Option<bool>) -> String {
    match saved {
        Some(false) => format!("{message} Saving failed; changes are kept until the next save."),
        _ => message.to_string(),
    }
}

fn resolve_data_dir(data_dir: &str) -> PathBuf {
    let trimmed = data_dir.trim();
    if !trimmed.is_empty() {
        return PathBuf::from(trimmed);
    }
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, notes_add, notes_edit, notes_list, notes_move, notes_open,
        notes_resolve_delete, notes_row_action, ping, resolve_data_dir,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn explicit_data_dir_wins() {
        assert_eq!(
            resolve_data_dir("  /data/notes "),
            std::path::PathBuf::from("/data/notes")
        );
    }

    // The session is process-global, so the whole screen flow runs in one test.
    #[test]
    fn list_screen_flow_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("create data dir");
        let dir_str = dir.path().to_str().expect("utf-8 temp path").to_string();

        let opened = notes_open(dir_str.clone());
        assert!(opened.ok);
        assert_eq!(opened.title, "3 Notes");

        let added = notes_add("buy milk".to_string());
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.items[0].entry, "buy milk");

        let rejected = notes_add(String::new());
        assert!(!rejected.ok);
        assert_eq!(rejected.items.len(), 4);

        let unchanged = notes_edit(0, "buy milk".to_string());
        assert_eq!(unchanged.message, "No changes.");

        let edited = notes_edit(2, "swipe edited".to_string());
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.items[0].entry, "swipe edited");
        assert_eq!(edited.items[1].entry, "buy milk");

        let moved = notes_move(0, 3);
        assert!(moved.ok, "{}", moved.message);
        assert_eq!(moved.items[3].entry, "swipe edited");

        let share = notes_row_action("Share".to_string(), 0);
        assert_eq!(share.share_text.as_deref(), Some("buy milk"));

        let prompt = notes_row_action("Delete".to_string(), 0);
        assert_eq!(prompt.prompt_title.as_deref(), Some("Delete For Sure?"));
        assert_eq!(prompt.prompt_buttons, vec!["Don't Delete", "Delete"]);

        let cancelled = notes_resolve_delete("Don't Delete".to_string());
        assert_eq!(cancelled.items.len(), 4);

        notes_row_action("Delete".to_string(), 0);
        let deleted = notes_resolve_delete("Delete".to_string());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.title, "3 Notes");
        assert!(deleted.items.iter().all(|item| item.entry != "buy milk"));

        let out_of_range = notes_move(0, 9);
        assert!(!out_of_range.ok);
        assert!(out_of_range.message.contains("out of range"));

        let reopened = notes_open(dir_str);
        assert_eq!(reopened.items, notes_list().items);
        assert_eq!(reopened.items, deleted.items);
    }
}
