// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Cooperative shutdown signalling.
//!
//! A [`ShutdownController`] flips a process-wide flag; every clone of the
//! [`Shutdown`] handle observes it. Workers check the flag at their queue
//! and accept boundaries, so triggering wakes all of them at once.

use tokio::sync::watch;

/// Creates a linked controller/handle pair.
pub fn channel() -> (ShutdownController, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownController { tx }, Shutdown { rx })
}

#[derive(Debug)]
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

impl ShutdownController {
    /// Signals shutdown to every handle. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been triggered (immediately if it already
    /// was). A dropped controller counts as triggered.
    pub async fn triggered(&mut self) {
        let _ = self.rx.wait_for(|flagged| *flagged).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_all_handles() {
        let (controller, shutdown) = channel();
        let mut a = shutdown.clone();
        let mut b = controller.subscribe();

        assert!(!a.is_triggered());
        controller.trigger();

        tokio::time::timeout(Duration::from_secs(1), a.triggered())
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), b.triggered())
            .await
            .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_dropped_controller_counts_as_triggered() {
        let (controller, mut shutdown) = channel();
        drop(controller);
        tokio::time::timeout(Duration::from_secs(1), shutdown.triggered())
            .await
            .unwrap();
    }
}
