//! State holder for the stream demonstration screen.
//!
//! One struct owns four independent emission channels, each illustrating a
//! different delivery contract:
//!
//! - notifications: hot broadcast, no replay; late subscribers miss the value
//! - status: hot and conflated; every new subscriber reads the latest value
//! - pulse: hot broadcast with a one-slot replay cache cleared on delivery
//! - sequence: cold stream re-executed from scratch per trigger
//!
//! Triggers are fire-and-forget: they spawn onto the ambient runtime and
//! never report failure, because a delay-then-emit cannot fail.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::{broadcast, watch};
use tracing::debug;

pub mod demos;
mod pulse;

pub use pulse::{PulseChannel, PulseReceiver};

pub const STATUS_INITIAL: &str = "status: idle";
pub const STATUS_TRIGGERED: &str = "status triggered";
pub const NOTIFICATION_TRIGGERED: &str = "notification triggered";
pub const PULSE_TRIGGERED: &str = "pulse triggered";

pub const NOTIFICATION_DELAY: Duration = Duration::from_millis(500);
pub const PULSE_DELAY: Duration = Duration::from_secs(5);
pub const SEQUENCE_STEP: Duration = Duration::from_secs(1);
pub const SEQUENCE_LEN: usize = 5;

pub struct StreamLabModel {
    notifications: broadcast::Sender<String>,
    status: watch::Sender<String>,
    pulse: PulseChannel,
    count: watch::Sender<u64>,
}

impl StreamLabModel {
    /// Builds the holder and schedules the startup pulse.
    ///
    /// Must be called from within a tokio runtime context, since the startup
    /// pulse spawns immediately.
    pub fn new() -> Arc<Self> {
        let (notifications, _) = broadcast::channel(16);
        let (status, _) = watch::channel(STATUS_INITIAL.to_string());
        let (count, _) = watch::channel(0u64);
        let model = Arc::new(Self {
            notifications,
            status,
            pulse: PulseChannel::new(16),
            count,
        });
        model.trigger_pulse();
        model
    }

    /// Schedules the deferred notification: delay, then broadcast a literal
    /// string to whoever is subscribed at delivery time. No replay.
    pub fn trigger_notification(&self) {
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_DELAY).await;
            debug!(
                thread = ?std::thread::current().name(),
                "delivering deferred notification"
            );
            let _ = notifications.send(NOTIFICATION_TRIGGERED.to_string());
        });
    }

    /// Sets the current status. Conflated: only the latest value is retained,
    /// and every new subscriber reads it immediately.
    pub fn trigger_status(&self) {
        self.status.send_replace(STATUS_TRIGGERED.to_string());
    }

    /// Schedules a pulse: delay, then emit through the replay channel. Also
    /// invoked once automatically at holder creation.
    pub fn trigger_pulse(&self) {
        let pulse = self.pulse.clone();
        tokio::spawn(async move {
            tokio::time::sleep(PULSE_DELAY).await;
            debug!(thread = ?std::thread::current().name(), "delivering pulse");
            pulse.emit(PULSE_TRIGGERED.to_string()).await;
        });
    }

    /// Returns a fresh cold stream of `"Time 0"`..`"Time 4"`, one element per
    /// step delay. Each call restarts from the beginning; streams from
    /// separate calls never interact.
    pub fn trigger_sequence(&self) -> impl Stream<Item = String> {
        futures::stream::unfold(0usize, |step| async move {
            if step >= SEQUENCE_LEN {
                return None;
            }
            if step > 0 {
                tokio::time::sleep(SEQUENCE_STEP).await;
            }
            Some((format!("Time {step}"), step + 1))
        })
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<String> {
        self.notifications.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<String> {
        self.status.subscribe()
    }

    pub async fn subscribe_pulse(&self) -> PulseReceiver {
        self.pulse.subscribe().await
    }

    pub fn subscribe_count(&self) -> watch::Receiver<u64> {
        self.count.subscribe()
    }

    /// Count is only written by the explicit stress demo; nothing reachable
    /// from the screen mutates it.
    pub(crate) fn set_count(&self, value: u64) {
        self.count.send_replace(value);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
