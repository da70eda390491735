//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the store is in
//! use.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired store entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
