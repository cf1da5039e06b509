//! crates/server/src/registry.rs
//!
//! Handle registry mapping opaque handle strings to open resources.
//!
//! The map sits behind a reader/writer lock: READ, WRITE and FSTAT only need
//! the shared side to find their resource, while OPEN and CLOSE take the
//! exclusive side to mutate the map. Resources are handed out as [`Arc`]s so
//! file I/O happens after the lock is released and never blocks other
//! lookups.
//!
//! Handles are the decimal rendering of a monotonically increasing counter.
//! A closed handle is never reissued within one registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use crate::error::ServerError;

/// Thread-safe table of open resources keyed by handle string.
///
/// # Example
///
/// ```
/// use server::HandleRegistry;
///
/// let registry = HandleRegistry::new();
/// let handle = registry.insert(String::from("resource"));
///
/// let resource = registry.lookup(handle.as_bytes()).unwrap();
/// assert_eq!(*resource, "resource");
///
/// registry.close(handle.as_bytes()).unwrap();
/// assert!(registry.lookup(handle.as_bytes()).unwrap_err().is_unknown_handle());
/// ```
#[derive(Debug)]
pub struct HandleRegistry<T> {
    entries: RwLock<FxHashMap<String, Arc<T>>>,
    next_handle: AtomicU64,
}

impl<T> HandleRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            next_handle: AtomicU64::new(0),
        }
    }

    /// Registers `resource` and returns the handle that now refers to it.
    pub fn insert(&self, resource: T) -> String {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed).to_string();
        let open = {
            let mut entries = self.write();
            entries.insert(handle.clone(), Arc::new(resource));
            entries.len()
        };
        logging::trace_handle!(handle = %handle, open, "handle allocated");
        handle
    }

    /// Returns the resource behind `handle`.
    ///
    /// Fails with [`ServerError::UnknownHandle`] when the handle was never
    /// issued or has already been closed.
    pub fn lookup(&self, handle: &[u8]) -> Result<Arc<T>, ServerError> {
        let found = std::str::from_utf8(handle)
            .ok()
            .and_then(|key| self.read().get(key).cloned());
        found.ok_or_else(|| unknown(handle, "lookup"))
    }

    /// Removes `handle` and returns its resource.
    ///
    /// Closing an unknown handle is an error, so a double close is visible to
    /// the caller. The resource itself is released once the last outstanding
    /// [`Arc`] from [`lookup`](Self::lookup) is dropped.
    pub fn close(&self, handle: &[u8]) -> Result<Arc<T>, ServerError> {
        let removed = std::str::from_utf8(handle)
            .ok()
            .and_then(|key| self.write().remove(key));
        match removed {
            Some(resource) => {
                logging::trace_handle!(
                    handle = %String::from_utf8_lossy(handle),
                    "handle closed"
                );
                Ok(resource)
            }
            None => Err(unknown(handle, "close")),
        }
    }

    /// Removes every handle, returning how many were open.
    pub fn close_all(&self) -> usize {
        let drained = std::mem::take(&mut *self.write());
        if !drained.is_empty() {
            logging::trace_handle!(count = drained.len(), "closed all handles");
        }
        drained.len()
    }

    /// Number of open handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Reports whether no handles are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<String, Arc<T>>> {
        self.entries
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, Arc<T>>> {
        self.entries
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(handle: &[u8], operation: &'static str) -> ServerError {
    let handle = String::from_utf8_lossy(handle).into_owned();
    tracing::warn!(target: "sftp::handle", handle = %handle, operation, "unknown handle");
    ServerError::UnknownHandle(handle)
}
