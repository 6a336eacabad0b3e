//! Bridge between the UI thread and the backend runtime worker.

pub mod commands;
pub mod runtime;
