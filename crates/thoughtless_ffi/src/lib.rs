//! Flutter-facing bridge over `thoughtless_core`.

pub mod api;
