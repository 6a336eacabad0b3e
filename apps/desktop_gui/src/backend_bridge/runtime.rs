//! Backend worker: owns the tokio runtime, the stream holder, and the
//! forwarding tasks that turn channel deliveries into UI events.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use stream_core::StreamLabModel;
use tokio_stream::StreamExt;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let model = StreamLabModel::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            spawn_forwarders(&model, &ui_tx).await;

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::info!(command = cmd.name(), "backend command");
                match cmd {
                    BackendCommand::TriggerNotification => model.trigger_notification(),
                    BackendCommand::TriggerStatus => model.trigger_status(),
                    BackendCommand::TriggerPulse => model.trigger_pulse(),
                    BackendCommand::TriggerSequence => {
                        let mut stream = Box::pin(model.trigger_sequence());
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            while let Some(item) = stream.next().await {
                                let _ = ui_tx.try_send(UiEvent::SequenceItem(item));
                            }
                            let _ = ui_tx.try_send(UiEvent::SequenceFinished);
                        });
                    }
                }
            }
        });
    });
}

/// One forwarding task per holder channel. Each forwards deliveries into the
/// bounded UI queue; a full queue drops the event rather than stalling the
/// backend.
async fn spawn_forwarders(model: &Arc<StreamLabModel>, ui_tx: &Sender<UiEvent>) {
    let mut notifications = model.subscribe_notifications();
    let ui = ui_tx.clone();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(value) => {
                    let _ = ui.try_send(UiEvent::Notification(value));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification forwarder lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut status = model.subscribe_status();
    let ui = ui_tx.clone();
    tokio::spawn(async move {
        // Forward the current value immediately, then every change.
        loop {
            let value = status.borrow_and_update().clone();
            let _ = ui.try_send(UiEvent::StatusChanged(value));
            if status.changed().await.is_err() {
                break;
            }
        }
    });

    let mut pulse = model.subscribe_pulse().await;
    let ui = ui_tx.clone();
    tokio::spawn(async move {
        while let Some(value) = pulse.recv().await {
            let _ = ui.try_send(UiEvent::Pulse(value));
        }
    });

    let mut count = model.subscribe_count();
    let ui = ui_tx.clone();
    tokio::spawn(async move {
        loop {
            let value = *count.borrow_and_update();
            let _ = ui.try_send(UiEvent::CountChanged(value));
            if count.changed().await.is_err() {
                break;
            }
        }
    });
}
