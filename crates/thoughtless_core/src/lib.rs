//! Core domain logic for Thoughtless.
//! This crate owns the note list and its on-disk archive.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, text_shape};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::sample::sample_notes;
pub use repo::note_archive::{
    ArchiveError, ArchiveResult, FileNoteArchive, MemoryNoteArchive, NoteArchive,
    ARCHIVE_FILE_NAME,
};
pub use service::note_list::{
    load_notes, save_notes, EditorOutcome, EditorResult, MergeOutcome, NoteList, NoteListError,
};
pub use service::row_action::{
    ConfirmationPrompt, DeleteDecision, DeleteOutcome, RowAction, RowActionOutcome, SharePayload,
};

/// Environment variable naming the data directory used by hosts.
pub const DATA_DIR_ENV: &str = "THOUGHTLESS_DATA_DIR";

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
