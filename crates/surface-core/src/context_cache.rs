// File: crates/surface-core/src/context_cache.rs
// Summary: Process-wide registry of per-thread drawing contexts, built lazily on first use.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::backend::GraphicsBackend;
use crate::config::ContextConfig;
use crate::error::InitError;
use crate::thread_bound::ThreadBound;

/// A drawing context shared by every renderer running on its thread.
pub type SharedContext<C> = Arc<ThreadBound<C>>;

/// Maps worker thread identity to that thread's drawing context.
///
/// Entries are created on the first `get_or_create` from a thread and are
/// never evicted automatically: a thread exiting does not release its
/// context. Call [`ThreadContextCache::evict_current_thread`] from the
/// worker thread before it exits to drop the table's reference.
pub struct ThreadContextCache<C> {
    contexts: Mutex<HashMap<ThreadId, SharedContext<C>>>,
    builds: AtomicUsize,
}

impl<C> ThreadContextCache<C> {
    pub fn new() -> Self {
        Self { contexts: Mutex::new(HashMap::new()), builds: AtomicUsize::new(0) }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<ThreadId, SharedContext<C>>> {
        self.contexts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the calling thread's context, running `build` on a miss.
    ///
    /// The table is not locked while `build` runs. A failed build stores
    /// nothing, so the next call retries from scratch.
    pub fn get_or_create<F>(&self, build: F) -> Result<SharedContext<C>, InitError>
    where
        F: FnOnce() -> Result<C, InitError>,
    {
        let id = thread::current().id();
        if let Some(existing) = self.table().get(&id) {
            return Ok(Arc::clone(existing));
        }

        let context = Arc::new(ThreadBound::new(build()?));
        self.builds.fetch_add(1, Ordering::Relaxed);
        log::info!("created drawing context for thread {id:?}");

        // Only this thread inserts under its own key, so the entry is still vacant.
        Ok(Arc::clone(self.table().entry(id).or_insert(context)))
    }

    /// Drops the table's reference to the calling thread's context.
    /// Renderers still holding it keep it alive until they finish.
    pub fn evict_current_thread(&self) -> bool {
        let id = thread::current().id();
        let evicted = self.table().remove(&id);
        if evicted.is_some() {
            log::info!("evicted drawing context for thread {id:?}");
        }
        evicted.is_some()
    }

    pub fn contains_current(&self) -> bool {
        self.table().contains_key(&thread::current().id())
    }

    pub fn len(&self) -> usize { self.table().len() }

    pub fn is_empty(&self) -> bool { self.table().is_empty() }

    /// Number of successful context builds over the cache's lifetime.
    pub fn build_count(&self) -> usize { self.builds.load(Ordering::Relaxed) }
}

impl<C> Default for ThreadContextCache<C> {
    fn default() -> Self { Self::new() }
}

impl<C> fmt::Debug for ThreadContextCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadContextCache")
            .field("threads", &self.len())
            .field("builds", &self.build_count())
            .finish()
    }
}

/// Context lookup used by the renderer: cache hit, or a fresh backend build.
pub(crate) fn context_for<B: GraphicsBackend>(
    cache: &ThreadContextCache<B::Context>,
    backend: &B,
    config: &ContextConfig,
) -> Result<SharedContext<B::Context>, InitError> {
    cache.get_or_create(|| {
        log::debug!("building drawing context with {config:?}");
        backend.build_context(config)
    })
}
