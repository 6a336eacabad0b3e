//! The demonstration screen: a count label, four trigger buttons, a status
//! line, and a transient toast overlay fed by backend deliveries.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use egui::{Align2, Id, Layout, Visuals};
use serde::{Deserialize, Serialize};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "stream_lab_desktop_settings";

const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub theme: ThemePreference,
}

struct Toast {
    message: String,
    expires_at: Instant,
}

pub struct StreamLabApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    count: u64,
    sequence_items: Vec<String>,
    sequence_running: bool,
    backend_error: Option<String>,
    toasts: Vec<Toast>,
    theme: ThemePreference,
    applied_theme: Option<ThemePreference>,
}

impl StreamLabApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedSettings>,
    ) -> Self {
        let theme = persisted_settings.unwrap_or_default().theme;
        Self {
            cmd_tx,
            ui_rx,
            status: "Backend worker starting...".to_string(),
            count: 0,
            sequence_items: Vec::new(),
            sequence_running: false,
            backend_error: None,
            toasts: Vec::new(),
            theme,
            applied_theme: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Notification(value) => {
                    self.push_toast(value);
                }
                UiEvent::StatusChanged(value) => {
                    self.status = value.clone();
                    self.push_toast(value);
                }
                UiEvent::Pulse(value) => {
                    self.push_toast(value);
                }
                UiEvent::SequenceItem(item) => {
                    self.sequence_running = true;
                    self.sequence_items.push(item);
                }
                UiEvent::SequenceFinished => {
                    self.sequence_running = false;
                }
                UiEvent::CountChanged(count) => {
                    self.count = count;
                }
                UiEvent::BackendFailed(message) => {
                    tracing::error!("backend failed: {message}");
                    self.status = message.clone();
                    self.backend_error = Some(message);
                }
            }
        }
    }

    fn push_toast(&mut self, message: String) {
        self.push_toast_at(message, Instant::now());
    }

    fn push_toast_at(&mut self, message: String, now: Instant) {
        self.toasts.push(Toast {
            message,
            expires_at: now + TOAST_TTL,
        });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let excess = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(..excess);
        }
    }

    fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        ctx.set_visuals(match self.theme {
            ThemePreference::Dark => Visuals::dark(),
            ThemePreference::Light => Visuals::light(),
        });
        self.applied_theme = Some(self.theme);
    }

    fn trigger_button(&mut self, ui: &mut egui::Ui, label: &str, cmd: BackendCommand) {
        if ui.button(label).clicked() {
            if matches!(cmd, BackendCommand::TriggerSequence) {
                self.sequence_items.clear();
                self.sequence_running = true;
            }
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }

    fn show_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Stream Lab");
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    let next = match self.theme {
                        ThemePreference::Dark => ("Light mode", ThemePreference::Light),
                        ThemePreference::Light => ("Dark mode", ThemePreference::Dark),
                    };
                    if ui.button(next.0).clicked() {
                        self.theme = next.1;
                    }
                });
            });
            ui.separator();

            ui.label(format!("Hello {}!", self.count));
            ui.add_space(8.0);

            self.trigger_button(ui, "Trigger notification", BackendCommand::TriggerNotification);
            ui.add_space(8.0);
            self.trigger_button(ui, "Trigger status", BackendCommand::TriggerStatus);
            ui.add_space(8.0);
            self.trigger_button(ui, "Trigger pulse", BackendCommand::TriggerPulse);
            ui.add_space(8.0);
            self.trigger_button(ui, "Trigger sequence", BackendCommand::TriggerSequence);

            if !self.sequence_items.is_empty() {
                ui.add_space(12.0);
                ui.group(|ui| {
                    ui.label(if self.sequence_running {
                        "Sequence running:"
                    } else {
                        "Sequence finished:"
                    });
                    ui.label(self.sequence_items.join("  "));
                });
            }

            if let Some(error) = &self.backend_error {
                ui.add_space(12.0);
                ui.colored_label(ui.visuals().error_fg_color, error);
            }

            ui.with_layout(Layout::bottom_up(egui::Align::Min), |ui| {
                ui.label(&self.status);
                ui.separator();
            });
        });
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(Id::new("toast-overlay"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(&toast.message);
                    });
                    ui.add_space(4.0);
                }
            });
    }
}

impl eframe::App for StreamLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.expire_toasts(Instant::now());
        self.apply_theme_if_needed(ctx);

        self.show_screen(ctx);
        self.show_toasts(ctx);

        if self.sequence_running || !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings { theme: self.theme };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn test_app() -> (StreamLabApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(16);
        (StreamLabApp::new(cmd_tx, ui_rx, None), ui_tx, cmd_rx)
    }

    #[test]
    fn status_event_updates_status_line_and_raises_toast() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::StatusChanged("status triggered".to_string()))
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.status, "status triggered");
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].message, "status triggered");
    }

    #[test]
    fn count_event_updates_label_without_toast() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx.send(UiEvent::CountChanged(7)).expect("send");

        app.process_ui_events();

        assert_eq!(app.count, 7);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn sequence_items_accumulate_until_finished() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        for i in 0..3 {
            ui_tx
                .send(UiEvent::SequenceItem(format!("Time {i}")))
                .expect("send");
        }
        ui_tx.send(UiEvent::SequenceFinished).expect("send");

        app.process_ui_events();

        assert_eq!(app.sequence_items, vec!["Time 0", "Time 1", "Time 2"]);
        assert!(!app.sequence_running);
    }

    #[test]
    fn toasts_expire_after_ttl_and_are_capped() {
        let (mut app, _ui_tx, _cmd_rx) = test_app();
        let now = Instant::now();
        for i in 0..(MAX_VISIBLE_TOASTS + 2) {
            app.push_toast_at(format!("toast {i}"), now);
        }
        assert_eq!(app.toasts.len(), MAX_VISIBLE_TOASTS);
        // The oldest toasts were dropped to make room.
        assert_eq!(app.toasts[0].message, "toast 2");

        app.expire_toasts(now + TOAST_TTL - Duration::from_millis(1));
        assert_eq!(app.toasts.len(), MAX_VISIBLE_TOASTS);

        app.expire_toasts(now + TOAST_TTL);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn backend_failure_is_pinned_on_screen() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::BackendFailed("failed to build backend runtime".to_string()))
            .expect("send");

        app.process_ui_events();

        assert_eq!(
            app.backend_error.as_deref(),
            Some("failed to build backend runtime")
        );
    }

    #[test]
    fn persisted_settings_round_trip_as_json() {
        let settings = PersistedSettings {
            theme: ThemePreference::Light,
        };
        let serialized = serde_json::to_string(&settings).expect("serialize");
        let restored: PersistedSettings = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(restored.theme, ThemePreference::Light);
    }
}
