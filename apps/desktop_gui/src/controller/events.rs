//! Events delivered from the backend worker to the screen.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Status-line text with no toast attached.
    Info(String),
    /// Deferred notification delivery; surfaced as a toast.
    Notification(String),
    /// Latest status value; surfaced as a toast and kept on screen.
    StatusChanged(String),
    /// Pulse delivery; surfaced as a toast.
    Pulse(String),
    /// One element of an in-flight progress sequence.
    SequenceItem(String),
    SequenceFinished,
    CountChanged(u64),
    /// The backend worker could not start; the screen stays up but inert.
    BackendFailed(String),
}
