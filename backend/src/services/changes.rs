//! Data-change notifications for the presentation layer
//!
//! Two signals are published: a data version that moves after every commit,
//! and the progress of the bulk insert currently running (or last run).

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crop_shared::{BulkProgress, DataChange};
use tokio::sync::{broadcast, watch};

const CHANNEL_CAPACITY: usize = 64;

/// Publishes a new data version whenever crop rows are committed
#[derive(Clone)]
pub struct ChangeNotifier {
    version: Arc<AtomicU64>,
    sender: broadcast::Sender<DataChange>,
    progress: Arc<watch::Sender<Option<BulkProgress>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (progress, _) = watch::channel(None);
        Self {
            version: Arc::new(AtomicU64::new(0)),
            sender,
            progress: Arc::new(progress),
        }
    }

    /// Current data version; views holding an older one should re-render
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChange> {
        self.sender.subscribe()
    }

    /// Record that `rows_inserted` rows were committed
    pub fn notify(&self, rows_inserted: u64) -> DataChange {
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        let change = DataChange {
            version,
            rows_inserted,
        };
        // No subscribers is fine; pollers read the version instead.
        let _ = self.sender.send(change);
        tracing::debug!(version, rows_inserted, "Crop data changed");
        change
    }

    /// Replace the published bulk-insert progress
    pub fn publish_progress(&self, progress: BulkProgress) {
        self.progress.send_replace(Some(progress));
    }

    /// Progress of the running or most recent bulk insert
    pub fn latest_progress(&self) -> Option<BulkProgress> {
        *self.progress.borrow()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
