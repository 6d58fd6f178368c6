//! Shutdown coordination for the guard.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Holds the sending half of a broadcast channel; the server (and tests)
/// subscribe and stop serving when a signal arrives or the coordinator is
/// dropped.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
