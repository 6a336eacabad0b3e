//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup failure); restart the app"
                .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queues_command_without_touching_status() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let mut status = "ready".to_string();

        dispatch_backend_command(&cmd_tx, BackendCommand::TriggerStatus, &mut status);

        assert_eq!(status, "ready");
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::TriggerStatus)
        ));
    }

    #[test]
    fn reports_full_queue_in_status_line() {
        let (cmd_tx, _cmd_rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::TriggerPulse, &mut status);
        dispatch_backend_command(&cmd_tx, BackendCommand::TriggerPulse, &mut status);

        assert!(status.contains("full"));
    }

    #[test]
    fn reports_disconnected_backend_in_status_line() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        drop(cmd_rx);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::TriggerNotification, &mut status);

        assert!(status.contains("disconnected"));
    }
}
