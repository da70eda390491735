//! Call-Counting Wrapper
//!
//! Counts invocations of an operation in the backing store.

use crate::error::Result;
use crate::store::StoreHandle;
use crate::wrap::Operation;

// == Counted ==
/// Wraps an operation so every invocation increments a store counter.
///
/// The counter lives at the operation's qualified name and is incremented
/// atomically BEFORE the inner operation runs, so a failing inner call still
/// counts as an invocation. Counting itself never fails on its own; a store
/// failure propagates exactly as the store client reports it.
pub struct Counted<Op> {
    store: StoreHandle,
    inner: Op,
}

impl<Op: Operation> Counted<Op> {
    // == Constructor ==
    /// Wraps `inner`, counting its calls in `store`.
    pub fn new(store: StoreHandle, inner: Op) -> Self {
        Self { store, inner }
    }

    // == Count ==
    /// Reads the current invocation count.
    pub fn count(&self) -> Result<i64> {
        read_count(&self.store, self.inner.name())
    }
}

impl<Op: Operation> Operation for Counted<Op> {
    type Input = Op::Input;
    type Output = Op::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, input: Self::Input) -> Result<Self::Output> {
        self.store.increment(self.inner.name())?;
        self.inner.call(input)
    }
}

// == Count Reader ==
/// Reads an operation's invocation count from the store.
///
/// An absent or undecodable counter reads as 0.
pub fn read_count(store: &StoreHandle, name: &str) -> Result<i64> {
    let count = store
        .get(name)?
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|text| text.parse().ok())
        .unwrap_or(0);
    Ok(count)
}
