//! Call-History Wrapper
//!
//! Records the inputs and outputs of an operation in index-aligned store
//! lists.

use crate::error::Result;
use crate::store::StoreHandle;
use crate::wrap::{inputs_key, outputs_key, Operation, Record};

// == Recorded ==
/// Wraps an operation so every call is logged to its history lists.
///
/// Effect order per call: append the rendered input to `"<name>:inputs"`,
/// invoke the inner operation, append the rendered output to
/// `"<name>:outputs"`, return the result. Position i of each list therefore
/// describes the i-th call.
///
/// If the inner operation fails, the input record is retained and no output
/// is appended. Replay pairs records by position and stops at the shorter
/// list, so a dangling input is never mispaired, only unshown.
pub struct Recorded<Op> {
    store: StoreHandle,
    inner: Op,
}

impl<Op> Recorded<Op>
where
    Op: Operation,
    Op::Input: Record,
    Op::Output: Record,
{
    // == Constructor ==
    /// Wraps `inner`, logging its calls in `store`.
    pub fn new(store: StoreHandle, inner: Op) -> Self {
        Self { store, inner }
    }
}

impl<Op> Operation for Recorded<Op>
where
    Op: Operation,
    Op::Input: Record,
    Op::Output: Record,
{
    type Input = Op::Input;
    type Output = Op::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.inner.name();

        self.store
            .append_to_list(&inputs_key(name), input.record().as_bytes())?;

        let output = self.inner.call(input)?;

        self.store
            .append_to_list(&outputs_key(name), output.record().as_bytes())?;

        Ok(output)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use crate::wrap::{Counted, FnOp};

    fn test_store() -> StoreHandle {
        StoreHandle::new(MemoryStore::new())
    }

    fn as_strings(items: Vec<Vec<u8>>) -> Vec<String> {
        items
            .into_iter()
            .map(|b| String::from_utf8(b).unwrap())
            .collect()
    }

    #[test]
    fn test_recorded_logs_aligned() {
        let store = test_store();
        let op = Recorded::new(
            store.clone(),
            FnOp::new("text.upper", |s: String| Ok(s.to_uppercase())),
        );

        op.call("hello".to_string()).unwrap();
        op.call("world".to_string()).unwrap();

        let inputs = as_strings(store.list_range("text.upper:inputs", 0, -1).unwrap());
        let outputs = as_strings(store.list_range("text.upper:outputs", 0, -1).unwrap());

        assert_eq!(inputs, vec!["hello", "world"]);
        assert_eq!(outputs, vec!["HELLO", "WORLD"]);
    }

    #[test]
    fn test_recorded_failure_keeps_input() {
        let store = test_store();
        let op = Recorded::new(
            store.clone(),
            FnOp::new("flaky.op", |s: String| -> Result<String> {
                if s == "bad" {
                    Err(StoreError::Unavailable("down".to_string()))
                } else {
                    Ok(s)
                }
            }),
        );

        op.call("ok".to_string()).unwrap();
        assert!(op.call("bad".to_string()).is_err());

        // Failed call leaves a dangling input record and no output
        let inputs = store.list_range("flaky.op:inputs", 0, -1).unwrap();
        let outputs = store.list_range("flaky.op:outputs", 0, -1).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_counted_and_recorded_stay_in_step() {
        let store = test_store();
        let op = Counted::new(
            store.clone(),
            Recorded::new(
                store.clone(),
                FnOp::new("text.upper", |s: String| Ok(s.to_uppercase())),
            ),
        );

        for text in ["a", "b", "c", "d"] {
            op.call(text.to_string()).unwrap();
        }

        // counter == N == inputs len == outputs len
        assert_eq!(op.count().unwrap(), 4);
        assert_eq!(store.list_range("text.upper:inputs", 0, -1).unwrap().len(), 4);
        assert_eq!(
            store.list_range("text.upper:outputs", 0, -1).unwrap().len(),
            4
        );
    }
}
