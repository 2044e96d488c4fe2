//! Host-side holder for the current graph snapshot.
//!
//! Searches never lock anything: they clone the current `Arc<MallGraph>` and
//! run against it.  An editor publishes a new graph with
//! [`GraphStore::replace`]; searches already holding the old snapshot finish
//! on it, and every later [`GraphStore::snapshot`] sees the new one.
//!
//! Writers are serialized by a separate edit lock, held across the whole
//! copy, edit, rebuild and swap of [`GraphStore::update`].  Two concurrent
//! edits therefore apply one after the other, each to the other's result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::info;

use crate::network::{MallGraph, MallGraphBuilder};
use crate::GraphResult;

/// Atomically swappable reference to the published [`MallGraph`].
pub struct GraphStore {
    current: RwLock<Arc<MallGraph>>,
    /// Held by writers only; `snapshot` never touches it.
    edit:    Mutex<()>,
    version: AtomicU64,
}

impl GraphStore {
    pub fn new(graph: MallGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
            edit:    Mutex::new(()),
            version: AtomicU64::new(0),
        }
    }

    /// The graph new searches should run against.
    ///
    /// The write lock is only held for a pointer swap, so this never waits
    /// on a search.
    pub fn snapshot(&self) -> Arc<MallGraph> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `graph` and return the snapshot it replaced.
    pub fn replace(&self, graph: MallGraph) -> Arc<MallGraph> {
        let _edit = self.edit.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(graph)
    }

    /// Apply an edit to a copy of the current graph and publish the result.
    ///
    /// Concurrent calls run one at a time, so every edit sees the previous
    /// one.  If `edit` or the rebuild fails, the published snapshot is
    /// unchanged.
    pub fn update<F>(&self, edit: F) -> GraphResult<Arc<MallGraph>>
    where
        F: FnOnce(&mut MallGraphBuilder) -> GraphResult<()>,
    {
        let _edit = self.edit.lock().unwrap_or_else(PoisonError::into_inner);
        let mut builder = self.snapshot().to_builder();
        edit(&mut builder)?;
        let graph = builder.build()?;
        Ok(self.publish(graph))
    }

    /// Swap in `graph`.  Callers hold the edit lock.
    fn publish(&self, graph: MallGraph) -> Arc<MallGraph> {
        let next = Arc::new(graph);
        let (nodes, connections) = (next.node_count(), next.connection_count());

        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;

        info!(version, nodes, connections, "published new mall graph snapshot");
        previous
    }

    /// Number of snapshots published since construction.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(MallGraph::empty())
    }
}
