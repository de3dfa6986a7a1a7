//! Command queue and worker runtime between the UI thread and the edit session.

pub mod commands;
pub mod runtime;
