//! Lightweight fan-out channel.
//!
//! The snap engine publishes "active zone changed" signals here so overlay
//! renderers never need a dependency edge back into the engine. Each
//! subscriber owns its own queue; publishing clones the signal into every
//! live queue and silently drops subscribers that have gone away.

use crossbeam_channel::{Receiver, Sender, unbounded};

#[derive(Debug)]
pub struct Broadcast<T: Clone> {
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Broadcast<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, signal: T) {
        self.subscribers
            .retain(|subscriber| subscriber.send(signal.clone()).is_ok());
    }
}
