//! The shared latest-snapshot cell.

use crate::telemetry::data::SensorRecord;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide cell holding the most recent [`SensorRecord`].
///
/// Exactly one writer (the poll loop) replaces the record wholesale;
/// any number of concurrent readers clone it out under a read lock. Because
/// replacement is a single whole-value write, a reader can never observe a
/// record mixing fields from two poll cycles.
///
/// Cloning the store is cheap and shares the underlying cell.
#[derive(Debug, Clone, Default)]
pub struct SensorStore {
    inner: Arc<RwLock<SensorRecord>>,
}

impl SensorStore {
    /// Create an empty store; every field of the record starts as `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored record with a new one from a completed poll cycle.
    pub async fn replace(&self, record: SensorRecord) {
        *self.inner.write().await = record;
    }

    /// Clone out the current record.
    pub async fn snapshot(&self) -> SensorRecord {
        self.inner.read().await.clone()
    }
}
