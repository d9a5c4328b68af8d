//! Shutdown fan-out.

use tokio::sync::broadcast;

/// Broadcasts a single "stop" to the server and anything else subscribed.
///
/// Tests hold one directly; `main` triggers it from [`super::signals`].
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        // No receivers left means everything already stopped.
        let _ = self.tx.send(());
    }

    /// Trigger once the process receives a termination signal.
    pub async fn trigger_on_signal(self) {
        super::signals::wait_for_termination().await;
        self.trigger();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
