//! Hot broadcast channel with a one-slot replay cache.
//!
//! A subscriber active at emission time receives the value through the
//! underlying broadcast. A subscriber attaching after emission but before any
//! delivery receives the cached value instead. Every delivery clears the
//! cache, so once a value has reached any subscriber, later subscribers see
//! nothing until the next emission.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

#[derive(Clone)]
pub struct PulseChannel {
    cache: Arc<Mutex<Option<String>>>,
    tx: broadcast::Sender<String>,
}

impl PulseChannel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            cache: Arc::new(Mutex::new(None)),
            tx,
        }
    }

    /// Stores the value in the replay slot and fans it out to live receivers.
    pub async fn emit(&self, value: String) {
        *self.cache.lock().await = Some(value.clone());
        let _ = self.tx.send(value);
    }

    /// Attaches a receiver. If the replay slot is occupied, its value is
    /// claimed by this receiver and handed out on the first `recv`.
    pub async fn subscribe(&self) -> PulseReceiver {
        let rx = self.tx.subscribe();
        let replay = self.cache.lock().await.take();
        PulseReceiver {
            cache: Arc::clone(&self.cache),
            rx,
            replay,
        }
    }
}

pub struct PulseReceiver {
    cache: Arc<Mutex<Option<String>>>,
    rx: broadcast::Receiver<String>,
    replay: Option<String>,
}

impl PulseReceiver {
    /// Resolves with the next pulse, or `None` once the channel is gone.
    pub async fn recv(&mut self) -> Option<String> {
        if let Some(value) = self.replay.take() {
            return Some(value);
        }
        loop {
            match self.rx.recv().await {
                Ok(value) => {
                    // Delivery clears the replay slot for late subscribers.
                    self.cache.lock().await.take();
                    return Some(value);
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
