use std::sync::Arc;

use storage::KeyValueStore;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum WriteOp {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Write-behind queue in front of a `KeyValueStore`.
///
/// Writes are applied by a single background task in submission order, so
/// later writes to a key always win. Callers never wait for a write; failures
/// are logged and dropped. Must be created inside a Tokio runtime.
#[derive(Clone)]
pub struct WriteBehind {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl WriteBehind {
    #[must_use]
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    /// Queue `key = value`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.submit(WriteOp::Set {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Queue removal of `key`.
    pub fn remove(&self, key: impl Into<String>) {
        self.submit(WriteOp::Remove { key: key.into() });
    }

    /// Wait until every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.submit(WriteOp::Flush(done_tx));
        // An error means the writer is gone; nothing left to wait for.
        let _ = done_rx.await;
    }

    fn submit(&self, op: WriteOp) {
        if self.tx.send(op).is_err() {
            warn!("persistence writer has stopped; dropping write");
        }
    }
}

async fn run_writer(store: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<WriteOp>) {
    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Set { key, value } => match store.set(&key, &value).await {
                Ok(()) => debug!(key = %key, "persisted"),
                Err(err) => warn!(key = %key, error = %err, "failed to persist value"),
            },
            WriteOp::Remove { key } => match store.remove(&key).await {
                Ok(()) => debug!(key = %key, "removed"),
                Err(err) => warn!(key = %key, error = %err, "failed to remove value"),
            },
            WriteOp::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("persistence writer stopped");
}
