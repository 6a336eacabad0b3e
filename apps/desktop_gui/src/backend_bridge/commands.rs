//! Backend commands queued from UI to the backend worker.

pub enum BackendCommand {
    TriggerNotification,
    TriggerStatus,
    TriggerPulse,
    TriggerSequence,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::TriggerNotification => "trigger_notification",
            BackendCommand::TriggerStatus => "trigger_status",
            BackendCommand::TriggerPulse => "trigger_pulse",
            BackendCommand::TriggerSequence => "trigger_sequence",
        }
    }
}
