//! Shutdown outcome coordination.
//!
//! Two concurrent tasks can end the process: the serve loop (normal exit or
//! serve error) and the signal listener (grace period exceeded). This slot
//! reconciles them: first writer wins, every later write is a no-op, and
//! the result is read exactly once.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// Create a linked writer/reader pair for a single outcome.
pub fn outcome_slot<T>() -> (OutcomeWriter<T>, OutcomeReader<T>) {
    let (tx, rx) = oneshot::channel();
    (
        OutcomeWriter {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        OutcomeReader { rx },
    )
}

/// Cloneable handle that can write the outcome at most once globally.
pub struct OutcomeWriter<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for OutcomeWriter<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> OutcomeWriter<T> {
    /// Deliver the outcome. Returns true if this call was the first writer.
    pub fn complete(&self, value: T) -> bool {
        let sender = self.tx.lock().expect("outcome slot mutex poisoned").take();
        match sender {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }
}

/// Consumes the slot's single value.
pub struct OutcomeReader<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> OutcomeReader<T> {
    /// Wait for the outcome. `None` if every writer dropped without writing.
    pub async fn recv(self) -> Option<T> {
        self.rx.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_writer_wins() {
        let (writer, reader) = outcome_slot::<u32>();
        let second = writer.clone();

        assert!(writer.complete(1));
        assert!(!second.complete(2));

        assert_eq!(reader.recv().await, Some(1));
    }

    #[tokio::test]
    async fn test_outcome_from_concurrent_tasks() {
        let (writer, reader) = outcome_slot::<&'static str>();

        let mut handles = Vec::new();
        for name in ["serve", "signal"] {
            let writer = writer.clone();
            handles.push(tokio::spawn(async move { writer.complete(name) }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }

        assert_eq!(wins, 1);
        assert!(reader.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_dropped_writers_yield_none() {
        let (writer, reader) = outcome_slot::<u32>();
        drop(writer);
        assert_eq!(reader.recv().await, None);
    }
}
