//! Note archive contracts and implementations.
//!
//! # Responsibility
//! - Persist the full ordered note list as one serialized document.
//! - Distinguish "nothing saved yet" from read/decode failures.
//!
//! # Invariants
//! - `save` rewrites the whole collection; there is no append format.
//! - `load` either returns every record or fails; partial lists are never returned.

use crate::model::note::Note;
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name of the archive inside the data directory.
pub const ARCHIVE_FILE_NAME: &str = "notes.json";

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Archive read/write failure.
#[derive(Debug)]
pub enum ArchiveError {
    Io(io::Error),
    Serialization(serde_json::Error),
    /// The archive was configured to reject writes.
    Unwritable(String),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "archive io failed: {err}"),
            Self::Serialization(err) => write!(f, "archive encoding failed: {err}"),
            Self::Unwritable(reason) => write!(f, "archive is not writable: {reason}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unwritable(_) => None,
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Storage contract for the ordered note list.
pub trait NoteArchive {
    /// Reads the archived list. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> ArchiveResult<Option<Vec<Note>>>;
    /// Overwrites the archive with `notes` in order.
    fn save(&self, notes: &[Note]) -> ArchiveResult<()>;
}

/// JSON file archive at a fixed path.
#[derive(Debug, Clone)]
pub struct FileNoteArchive {
    path: PathBuf,
}

impl FileNoteArchive {
    /// Archive stored at exactly `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Archive stored as [`ARCHIVE_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(ARCHIVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteArchive for FileNoteArchive {
    fn load(&self) -> ArchiveResult<Option<Vec<Note>>> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("event=archive_load module=repo status=ok found=false");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let notes: Vec<Note> = serde_json::from_slice(&bytes)?;
        info!(
            "event=archive_load module=repo status=ok found=true count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Some(notes))
    }

    fn save(&self, notes: &[Note]) -> ArchiveResult<()> {
        let started_at = Instant::now();
        let encoded = serde_json::to_vec_pretty(notes)?;
        write_atomically(&self.path, &encoded)?;
        info!(
            "event=archive_save module=repo status=ok count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Stages `bytes` in a sibling temp file and renames it over `path`, so a
/// reader sees either the previous document or the new one.
fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// In-process archive holding the encoded document in memory.
///
/// Stores the same JSON the file archive writes, so decode failures behave
/// identically.
#[derive(Debug, Default)]
pub struct MemoryNoteArchive {
    document: RefCell<Option<String>>,
    reject_writes: Cell<bool>,
}

impl MemoryNoteArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive pre-seeded with a raw document, valid or not.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
            reject_writes: Cell::new(false),
        }
    }

    /// Makes subsequent saves fail with [`ArchiveError::Unwritable`].
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Current raw document, if any save has happened.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl NoteArchive for MemoryNoteArchive {
    fn load(&self) -> ArchiveResult<Option<Vec<Note>>> {
        match self.document.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, notes: &[Note]) -> ArchiveResult<()> {
        if self.reject_writes.get() {
            return Err(ArchiveError::Unwritable("writes rejected".to_string()));
        }
        let encoded = serde_json::to_string(notes)?;
        *self.document.borrow_mut() = Some(encoded);
        Ok(())
    }
}

impl<A: NoteArchive + ?Sized> NoteArchive for &A {
    fn load(&self) -> ArchiveResult<Option<Vec<Note>>> {
        (**self).load()
    }

    fn save(&self, notes: &[Note]) -> ArchiveResult<()> {
        (**self).save(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveError, MemoryNoteArchive, NoteArchive};
    use crate::model::note::Note;

    #[test]
    fn memory_archive_starts_empty() {
        let archive = MemoryNoteArchive::new();
        assert!(archive.load().unwrap().is_none());
    }

    #[test]
    fn memory_archive_rejects_writes_when_configured() {
        let archive = MemoryNoteArchive::new();
        archive.set_reject_writes(true);
        let notes = vec![Note::new("kept in memory").unwrap()];

        let err = archive.save(&notes).unwrap_err();
        assert!(matches!(err, ArchiveError::Unwritable(_)));
        assert!(archive.document().is_none());
    }

    #[test]
    fn memory_archive_reports_garbage_as_serialization_error() {
        let archive = MemoryNoteArchive::with_document("not json");
        assert!(matches!(
            archive.load().unwrap_err(),
            ArchiveError::Serialization(_)
        ));
    }
}
