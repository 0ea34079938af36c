//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shown by the list screen and archived to disk.
//! - Provide the validating factory used at insertion and edit time.
//!
//! # Invariants
//! - `entry` is never empty; construction and deserialization both enforce it.
//! - `id` and `date_of_creation` survive edits; only `entry` and the
//!   modification stamp change.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display format for the modification stamp rendered under each row.
pub const MODIFICATION_STAMP_FMT: &str = "%b %-d, %Y at %-I:%M %p";

/// Stable identifier for a note across edits and reloads.
pub type NoteId = Uuid;

/// Validation failures for note construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Note text was empty.
    EmptyEntry,
    /// Caller-provided id was the nil UUID.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEntry => write!(f, "note entry must not be empty"),
            Self::NilId => write!(f, "note id must not be nil"),
        }
    }
}

impl Error for NoteValidationError {}

/// One user-authored text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NoteWire")]
pub struct Note {
    /// Stable identity; regenerated for legacy records that lack one.
    pub id: NoteId,
    /// Text body, used both for display and for sharing.
    pub entry: String,
    /// Creation instant, serialized as RFC 3339 UTC.
    pub date_of_creation: DateTime<Utc>,
    /// Human-readable stamp of the last mutation.
    pub date_modification_time_stamp: String,
}

/// Persisted shape accepted on load, validated into [`Note`].
#[derive(Deserialize)]
struct NoteWire {
    #[serde(default = "Uuid::new_v4")]
    id: NoteId,
    entry: String,
    date_of_creation: DateTime<Utc>,
    #[serde(default)]
    date_modification_time_stamp: Option<String>,
}

impl TryFrom<NoteWire> for Note {
    type Error = NoteValidationError;

    fn try_from(wire: NoteWire) -> Result<Self, Self::Error> {
        let stamp = wire
            .date_modification_time_stamp
            .unwrap_or_else(|| modification_stamp(wire.date_of_creation));
        let note = Self {
            id: wire.id,
            entry: wire.entry,
            date_of_creation: wire.date_of_creation,
            date_modification_time_stamp: stamp,
        };
        note.validate()?;
        Ok(note)
    }
}

impl Note {
    /// Creates a note stamped with the current time.
    ///
    /// # Errors
    /// - `EmptyEntry` when `entry` is empty; no note is produced.
    pub fn new(entry: impl Into<String>) -> Result<Self, NoteValidationError> {
        Self::with_created_at(entry, Utc::now())
    }

    /// Creates a note with a caller-provided creation instant.
    pub fn with_created_at(
        entry: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: Uuid::new_v4(),
            entry: entry.into(),
            date_of_creation: created_at,
            date_modification_time_stamp: modification_stamp(created_at),
        };
        note.validate()?;
        Ok(note)
    }

    /// Returns an edited copy carrying `entry` and a fresh modification stamp.
    ///
    /// Identity and creation time are preserved.
    pub fn revise(&self, entry: impl Into<String>) -> Result<Self, NoteValidationError> {
        self.revise_at(entry, Utc::now())
    }

    /// Same as [`Note::revise`] with an explicit modification instant.
    pub fn revise_at(
        &self,
        entry: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: self.id,
            entry: entry.into(),
            date_of_creation: self.date_of_creation,
            date_modification_time_stamp: modification_stamp(modified_at),
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.entry.is_empty() {
            return Err(NoteValidationError::EmptyEntry);
        }
        Ok(())
    }
}

/// Renders the display stamp for `at` in local time.
pub fn modification_stamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format(MODIFICATION_STAMP_FMT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{modification_stamp, Note, NoteValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn revise_keeps_identity_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2016, 8, 4, 9, 30, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2016, 8, 5, 18, 0, 0).unwrap();
        let note = Note::with_created_at("draft", created).unwrap();

        let edited = note.revise_at("final", modified).unwrap();
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.date_of_creation, created);
        assert_eq!(edited.entry, "final");
        assert_eq!(edited.date_modification_time_stamp, modification_stamp(modified));
    }

    #[test]
    fn revise_rejects_empty_entry() {
        let note = Note::new("draft").unwrap();
        assert_eq!(note.revise("").unwrap_err(), NoteValidationError::EmptyEntry);
    }
}
