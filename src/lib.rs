//! kvtrace - Call-counting, call-history and TTL-cache wrappers
//!
//! Wraps operations over a key-value store so that every invocation is
//! counted, recorded in index-aligned input/output logs, and optionally
//! served from a TTL cache instead of recomputed.

pub mod config;
pub mod counter;
pub mod docs;
pub mod error;
pub mod store;
pub mod tasks;
pub mod web;
pub mod wrap;

pub use config::Config;
pub use counter::{CachedCounter, Value};
pub use docs::Collection;
pub use error::{Result, StoreError};
pub use store::{KvStore, MemoryStore, StoreHandle};
pub use tasks::spawn_cleanup_task;
pub use web::{Fetcher, HttpFetcher, PageCache};
