//! Read-only snapshot publishing for display threads

use std::sync::Arc;

use parking_lot::RwLock;
use repsense_counter::ExerciseSnapshot;

/// Shared, read-only view of the latest [`ExerciseSnapshot`].
///
/// The tracking session is the only writer. Clones can be handed to a UI
/// thread, which only ever sees copies.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<ExerciseSnapshot>>,
}

impl SnapshotHandle {
    pub(crate) fn new(initial: ExerciseSnapshot) -> Self {
        SnapshotHandle {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Latest published snapshot
    pub fn load(&self) -> ExerciseSnapshot {
        *self.inner.read()
    }

    pub(crate) fn publish(&self, snapshot: ExerciseSnapshot) {
        *self.inner.write() = snapshot;
    }
}
