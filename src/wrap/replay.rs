//! Replay Utility
//!
//! Read-only reconstruction of a recorded call history.

use crate::error::Result;
use crate::store::StoreHandle;
use crate::wrap::{inputs_key, outputs_key, read_count};

// == Replay ==
/// Renders the recorded history of an operation.
///
/// The report starts with a one-line call-count summary, followed by one
/// line per recorded call pairing the i-th input with the i-th output:
///
/// ```text
/// CachedCounter.store was called 2 times:
/// CachedCounter.store(hello) -> 5f54e6a2-...
/// CachedCounter.store(world) -> 0c9b0f7e-...
/// ```
///
/// Records that fail to decode render as the empty string; a missing or
/// malformed counter renders as 0. Reads only, never writes.
pub fn replay(store: &StoreHandle, name: &str) -> Result<String> {
    let count = read_count(store, name)?;
    let inputs = store.list_range(&inputs_key(name), 0, -1)?;
    let outputs = store.list_range(&outputs_key(name), 0, -1)?;

    let mut report = format!("{name} was called {count} times:\n");
    for (input, output) in inputs.into_iter().zip(outputs) {
        let input = String::from_utf8(input).unwrap_or_default();
        let output = String::from_utf8(output).unwrap_or_default();
        report.push_str(&format!("{name}({input}) -> {output}\n"));
    }

    Ok(report)
}

/// Prints the recorded history of an operation to stdout.
pub fn print_replay(store: &StoreHandle, name: &str) -> Result<()> {
    print!("{}", replay(store, name)?);
    Ok(())
}
