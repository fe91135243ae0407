//! Model delivery queue.
//!
//! Asset loading itself happens outside this crate. Loaders (any thread)
//! push finished prefabs through a [`ModelSender`]; the host thread drains the
//! matching [`ModelQueue`] between events, so delivery order and timing never
//! race with picking.

use crate::assets::prefab::Prefab;

/// A message from an external loader.
#[derive(Debug)]
pub enum ModelDelivery {
    Loaded(Prefab),
    Failed { uri: String, reason: String },
}

/// Sending half, cloned into loader threads or callbacks.
#[derive(Clone)]
pub struct ModelSender {
    tx: flume::Sender<ModelDelivery>,
}

impl ModelSender {
    /// Delivers a loaded model. Returns `false` when the receiving context
    /// has been dropped.
    pub fn deliver(&self, prefab: Prefab) -> bool {
        self.tx.send(ModelDelivery::Loaded(prefab)).is_ok()
    }

    /// Reports a failed load. The receiver only logs it.
    pub fn fail(&self, uri: &str, reason: &str) -> bool {
        self.tx
            .send(ModelDelivery::Failed {
                uri: uri.to_string(),
                reason: reason.to_string(),
            })
            .is_ok()
    }
}

/// Receiving half, owned by the interaction context.
pub struct ModelQueue {
    tx: flume::Sender<ModelDelivery>,
    rx: flume::Receiver<ModelDelivery>,
}

impl Default for ModelQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    #[must_use]
    pub fn sender(&self) -> ModelSender {
        ModelSender { tx: self.tx.clone() }
    }

    /// Takes every delivery that has arrived so far without blocking.
    pub fn drain(&self) -> impl Iterator<Item = ModelDelivery> + '_ {
        self.rx.try_iter()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliveries_from_other_threads_arrive_in_send_order() {
        let queue = ModelQueue::new();
        let sender = queue.sender();

        std::thread::spawn(move || {
            sender.deliver(Prefab::new("first"));
            sender.fail("models/missing.glb", "not found");
            sender.deliver(Prefab::new("second"));
        })
        .join()
        .unwrap();

        let names: Vec<String> = queue
            .drain()
            .map(|d| match d {
                ModelDelivery::Loaded(p) => p.name,
                ModelDelivery::Failed { uri, .. } => uri,
            })
            .collect();
        assert_eq!(names, ["first", "models/missing.glb", "second"]);
        assert_eq!(queue.pending(), 0);
    }
}
