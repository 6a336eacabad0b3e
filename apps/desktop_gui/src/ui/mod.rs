//! UI layer: the single demonstration screen and its toast overlay.

pub mod app;

pub use app::{PersistedSettings, StreamLabApp, SETTINGS_STORAGE_KEY};
