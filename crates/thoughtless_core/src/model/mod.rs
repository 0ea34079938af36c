//! Domain model for the note list.
//!
//! # Responsibility
//! - Define the note record and its construction rules.
//! - Provide the fixed sample set used on first launch.
//!
//! # Invariants
//! - Every note has a non-empty `entry`.

pub mod note;
pub mod sample;
