//! Store Module
//!
//! Key-value store abstraction with TTL expiry, plus the in-memory backend
//! and the cloneable handle components receive at construction.

mod entry;
mod memory;
mod stats;


use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::Duration;

use crate::error::{Result, StoreError};

// Re-export public types
pub use entry::{Entry, Slot};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == KvStore Trait ==
/// Contract the backing key-value store must provide.
///
/// Semantics follow the usual key-value conventions: counters are decimal
/// text that increments atomically from an implicit zero, lists are
/// append-only with inclusive negative-index ranges, and scalar values may
/// carry a TTL after which they read as absent.
pub trait KvStore: Send + Sync {
    /// Atomically increments the integer at `key` by 1, counting from zero
    /// for an absent key. Returns the new value.
    fn increment(&mut self, key: &str) -> Result<i64>;

    /// Reads the scalar value at `key`; absent or expired keys read as `None`.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a scalar value without expiry.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores a scalar value that expires after `ttl`.
    fn set_with_expiry(&mut self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Appends a record to the list at `key`, creating it on first use.
    fn append_to_list(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the records at inclusive positions `start..=stop` of the list
    /// at `key`; negative indices count from the end.
    fn list_range(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes expired entries eagerly. Backends without expiry may keep the
    /// default no-op.
    fn purge_expired(&mut self) -> usize {
        0
    }
}

// == Store Handle ==
/// Cloneable handle to a shared store.
///
/// Components take a `StoreHandle` at construction instead of reaching for a
/// process-wide connection; cloning the handle shares the same underlying
/// store. Each call acquires the lock for the duration of one store
/// operation, which is what makes the wrappers' increments and appends
/// atomic with respect to one another.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<Box<dyn KvStore>>>,
}

impl StoreHandle {
    // == Constructor ==
    /// Creates a handle owning the given backend.
    pub fn new<S: KvStore + 'static>(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Box::new(store))),
        }
    }

    /// Acquires the store lock, mapping poisoning to `Unavailable`.
    fn lock(&self) -> Result<RwLockWriteGuard<'_, Box<dyn KvStore>>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    /// Atomically increments the integer at `key` by 1.
    pub fn increment(&self, key: &str) -> Result<i64> {
        self.lock()?.increment(key)
    }

    /// Reads the scalar value at `key`.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.lock()?.get(key)
    }

    /// Stores a scalar value without expiry.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.set(key, value)
    }

    /// Stores a scalar value that expires after `ttl`.
    pub fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.lock()?.set_with_expiry(key, value, ttl)
    }

    /// Appends a record to the list at `key`.
    pub fn append_to_list(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.append_to_list(key, value)
    }

    /// Reads the records at `start..=stop` of the list at `key`.
    pub fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.lock()?.list_range(key, start, stop)
    }

    /// Removes expired entries eagerly, returning how many were dropped.
    pub fn purge_expired(&self) -> Result<usize> {
        Ok(self.lock()?.purge_expired())
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle").finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_shares_backend() {
        let handle = StoreHandle::new(MemoryStore::new());
        let clone = handle.clone();

        handle.set("key1", b"value1").unwrap();

        assert_eq!(clone.get("key1").unwrap(), Some(b"value1".to_vec()));
    }

    #[test]
    fn test_handle_increment() {
        let handle = StoreHandle::new(MemoryStore::new());

        assert_eq!(handle.increment("counter").unwrap(), 1);
        assert_eq!(handle.increment("counter").unwrap(), 2);
    }

    #[test]
    fn test_handle_list_ops() {
        let handle = StoreHandle::new(MemoryStore::new());

        handle.append_to_list("log", b"a").unwrap();
        handle.append_to_list("log", b"b").unwrap();

        let items = handle.list_range("log", 0, -1).unwrap();
        assert_eq!(items, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_handle_purge() {
        let handle = StoreHandle::new(MemoryStore::new());

        handle
            .set_with_expiry("key1", b"value1", Duration::from_millis(0))
            .unwrap();

        // TTL of zero expires immediately at the boundary
        let removed = handle.purge_expired().unwrap();
        assert_eq!(removed, 1);
    }
}
