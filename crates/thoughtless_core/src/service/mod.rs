//! List-screen use-case services.
//!
//! # Responsibility
//! - Orchestrate list mutations and archive writes for UI callers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_list;
pub mod row_action;
