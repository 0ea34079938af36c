//! Persistence layer for the note list.
//!
//! # Responsibility
//! - Define the archive contract used by the list service.
//! - Keep encoding and file details out of service orchestration.
//!
//! # Invariants
//! - Archives store the full ordered list; reads are all-or-nothing.

pub mod note_archive;
