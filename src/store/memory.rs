//! In-Memory Store Module
//!
//! HashMap-backed key-value store with TTL expiration, the default backend
//! behind a `StoreHandle`.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, StoreError};
use crate::store::entry::{Entry, Slot};
use crate::store::{KvStore, StoreStats};

// == Memory Store ==
/// In-memory key-value store with TTL support.
///
/// Expired entries are removed lazily on read; `purge_expired` sweeps the
/// remainder (normally driven by the background cleanup task).
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Access statistics
    stats: StoreStats,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the live entry for a key, dropping it first if it expired.
    fn live_entry(&mut self, key: &str) -> Option<&Entry> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.stats.record_expiration();
                self.stats.set_total_entries(self.entries.len());
                return None;
            }
        }
        self.entries.get(key)
    }
}

impl KvStore for MemoryStore {
    // == Increment ==
    /// Atomically increments the integer value at `key` by 1.
    ///
    /// An absent or expired key counts from zero. The entry's expiry, if
    /// any, is preserved across the increment.
    fn increment(&mut self, key: &str) -> Result<i64> {
        let (current, expires_at) = match self.live_entry(key) {
            Some(entry) => match &entry.slot {
                Slot::Bytes(bytes) => {
                    let text = std::str::from_utf8(bytes)
                        .map_err(|_| StoreError::WrongType(key.to_string()))?;
                    let value: i64 = text
                        .parse()
                        .map_err(|_| StoreError::WrongType(key.to_string()))?;
                    (value, entry.expires_at)
                }
                Slot::List(_) => return Err(StoreError::WrongType(key.to_string())),
            },
            None => (0, None),
        };

        let next = current + 1;
        let mut entry = Entry::new(Slot::Bytes(next.to_string().into_bytes()), None);
        entry.expires_at = expires_at;
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(next)
    }

    // == Get ==
    /// Retrieves the scalar value at `key`.
    ///
    /// Absent and expired keys read as `None`; expired entries are removed
    /// on the way.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = match self.live_entry(key) {
            Some(entry) => match &entry.slot {
                Slot::Bytes(bytes) => Some(bytes.clone()),
                Slot::List(_) => return Err(StoreError::WrongType(key.to_string())),
            },
            None => None,
        };

        match value {
            Some(value) => {
                self.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Stores a scalar value without expiry, overwriting any existing entry.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let entry = Entry::new(Slot::Bytes(value.to_vec()), None);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Set With Expiry ==
    /// Stores a scalar value that expires after `ttl`, overwriting any
    /// existing entry and resetting its TTL.
    fn set_with_expiry(&mut self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let entry = Entry::new(Slot::Bytes(value.to_vec()), Some(ttl));
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Append To List ==
    /// Appends a record to the list at `key`, creating the list on first use.
    ///
    /// Lists never expire.
    fn append_to_list(&mut self, key: &str, value: &[u8]) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(entry) => match &mut entry.slot {
                Slot::List(items) => items.push(value.to_vec()),
                Slot::Bytes(_) => return Err(StoreError::WrongType(key.to_string())),
            },
            None => {
                let entry = Entry::new(Slot::List(vec![value.to_vec()]), None);
                self.entries.insert(key.to_string(), entry);
            }
        }
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == List Range ==
    /// Returns the records at positions `start..=stop` of the list at `key`.
    ///
    /// Negative indices count from the end of the list, so `(0, -1)` reads
    /// the whole list. Absent keys read as an empty list.
    fn list_range(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let items = match self.entries.get(key) {
            Some(entry) => match &entry.slot {
                Slot::List(items) => items,
                Slot::Bytes(_) => return Err(StoreError::WrongType(key.to_string())),
            },
            None => return Ok(Vec::new()),
        };

        Ok(match resolve_range(items.len(), start, stop) {
            Some((lo, hi)) => items[lo..=hi].to_vec(),
            None => Vec::new(),
        })
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.stats.record_expiration();
        }
        self.stats.set_total_entries(self.entries.len());

        count
    }
}

// == Range Resolution ==
/// Clamps an inclusive `(start, stop)` pair with negative-index support to
/// valid positions in a list of length `len`.
///
/// Returns `None` when the resolved range is empty.
fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;

    let mut lo = if start < 0 { len + start } else { start };
    let mut hi = if stop < 0 { len + stop } else { stop };

    if lo < 0 {
        lo = 0;
    }
    if hi >= len {
        hi = len - 1;
    }
    if lo > hi || lo >= len || hi < 0 {
        return None;
    }

    Some((lo as usize, hi as usize))
}
