// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Named bounded FIFO queues connecting pipeline stages.
//!
//! Producers suspend while the queue is full, consumers while it is empty;
//! a shutdown signal wakes both sides. Ownership of the queued item moves
//! through the channel, so at any moment a job is held by exactly one stage
//! (its worker or its input queue).

use crate::shutdown::Shutdown;
use tokio::sync::mpsc;
use tracing::debug;

/// Creates a named bounded queue split into its producer and consumer
/// halves.
pub fn bounded<T>(
    name: &'static str,
    capacity: usize,
    shutdown: Shutdown,
) -> (Pusher<T>, Popper<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    debug!(queue = name, capacity, "queue initialized");
    (
        Pusher {
            name,
            capacity,
            tx,
            shutdown: shutdown.clone(),
        },
        Popper { name, rx, shutdown },
    )
}

pub struct Pusher<T> {
    name: &'static str,
    capacity: usize,
    tx: mpsc::Sender<T>,
    shutdown: Shutdown,
}

impl<T> Clone for Pusher<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            capacity: self.capacity,
            tx: self.tx.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T> Pusher<T> {
    /// Enqueues an item, suspending while the queue is full.
    ///
    /// Returns the item back on shutdown or when the consumer is gone, so
    /// the caller decides how to dispose of it.
    pub async fn push(&self, item: T) -> Result<(), T> {
        let mut shutdown = self.shutdown.clone();
        tokio::select! {
            biased;
            _ = shutdown.triggered() => Err(item),
            permit = self.tx.reserve() => match permit {
                Ok(permit) => {
                    permit.send(item);
                    debug!(queue = self.name, depth = self.depth(), "item enqueued");
                    Ok(())
                }
                Err(_) => Err(item),
            },
        }
    }

    /// Current number of queued items (diagnostic only).
    pub fn depth(&self) -> usize {
        self.capacity - self.tx.capacity()
    }
}

pub struct Popper<T> {
    name: &'static str,
    rx: mpsc::Receiver<T>,
    shutdown: Shutdown,
}

impl<T> Popper<T> {
    /// Dequeues the next item, suspending while the queue is empty.
    ///
    /// Returns `None` on shutdown or once every producer is gone.
    pub async fn pop(&mut self) -> Option<T> {
        let mut shutdown = self.shutdown.clone();
        tokio::select! {
            biased;
            _ = shutdown.triggered() => None,
            item = self.rx.recv() => {
                if item.is_some() {
                    debug!(queue = self.name, "item dequeued");
                }
                item
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_fifo_order() {
        let (_controller, sd) = shutdown::channel();
        let (pusher, mut popper) = bounded("test", 4, sd);

        for i in 0..4 {
            pusher.push(i).await.unwrap();
        }
        for i in 0..4 {
            assert_eq!(popper.pop().await, Some(i));
        }
    }

    #[tokio::test]
    async fn test_push_blocks_when_full() {
        let (_controller, sd) = shutdown::channel();
        let (pusher, mut popper) = bounded("test", 1, sd);

        pusher.push(1u32).await.unwrap();
        assert_eq!(pusher.depth(), 1);

        // Queue is full: the second push must suspend until a pop.
        let blocked = timeout(Duration::from_millis(50), pusher.push(2)).await;
        assert!(blocked.is_err());

        assert_eq!(popper.pop().await, Some(1));
        pusher.push(3).await.unwrap();
        assert_eq!(popper.pop().await, Some(3));
    }

    #[tokio::test]
    async fn test_pop_blocks_when_empty() {
        let (_controller, sd) = shutdown::channel();
        let (pusher, mut popper) = bounded::<u32>("test", 4, sd);

        let blocked = timeout(Duration::from_millis(50), popper.pop()).await;
        assert!(blocked.is_err());

        pusher.push(7).await.unwrap();
        assert_eq!(popper.pop().await, Some(7));
    }

    #[tokio::test]
    async fn test_shutdown_wakes_both_sides() {
        let (controller, sd) = shutdown::channel();
        let (pusher, mut popper) = bounded("test", 1, sd);
        pusher.push(1u32).await.unwrap();

        let push_task = {
            let pusher = pusher.clone();
            tokio::spawn(async move { pusher.push(2).await })
        };
        controller.trigger();

        // The blocked push yields its item back; the pop yields None.
        assert_eq!(push_task.await.unwrap(), Err(2));
        assert_eq!(popper.pop().await, None);
    }

    #[tokio::test]
    async fn test_pop_sees_none_when_producers_drop() {
        let (_controller, sd) = shutdown::channel();
        let (pusher, mut popper) = bounded("test", 2, sd);
        pusher.push(5u32).await.unwrap();
        drop(pusher);

        assert_eq!(popper.pop().await, Some(5));
        assert_eq!(popper.pop().await, None);
    }
}
