//! Single-writer / multi-reader snapshot of the latest reading.
//!
//! The writer publishes a complete immutable value; readers get an `Arc` to
//! whichever value was current when they looked. A reader can never see a mix
//! of fields from two different ticks because values are replaced whole, never
//! edited in place.

use parking_lot::RwLock;
use std::sync::Arc;

type Slot<T> = Arc<RwLock<Option<Arc<T>>>>;

/// Create a connected writer/reader pair with nothing published yet.
pub fn snapshot_channel<T>() -> (SnapshotWriter<T>, SnapshotReader<T>) {
    let slot: Slot<T> = Arc::new(RwLock::new(None));
    (
        SnapshotWriter { slot: slot.clone() },
        SnapshotReader { slot },
    )
}

/// Publishing side. Not `Clone`: there is exactly one writer per snapshot.
pub struct SnapshotWriter<T> {
    slot: Slot<T>,
}

impl<T> SnapshotWriter<T> {
    /// Replace the current value and return the published handle.
    pub fn publish(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.slot.write() = Some(Arc::clone(&value));
        value
    }

    /// A reader attached to this writer's snapshot.
    pub fn reader(&self) -> SnapshotReader<T> {
        SnapshotReader {
            slot: Arc::clone(&self.slot),
        }
    }
}

/// Reading side. Cheap to clone and share across tasks.
pub struct SnapshotReader<T> {
    slot: Slot<T>,
}

impl<T> Clone for SnapshotReader<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> SnapshotReader<T> {
    /// The most recently published value, if any.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.slot.read().is_some()
    }
}
