//! Wrapper Module
//!
//! Explicit composition of cross-cutting behavior around operations: an
//! operation is a value with a stable qualified name, and each wrapper takes
//! the underlying operation and yields a new one with the same contract.
//!
//! The qualified name doubles as the store key scheme: the counter lives at
//! the name itself, the call logs at `"<name>:inputs"` / `"<name>:outputs"`.

mod counted;
mod recorded;
mod replay;

use std::marker::PhantomData;

use crate::error::Result;

// Re-export public types
pub use counted::{read_count, Counted};
pub use recorded::Recorded;
pub use replay::{print_replay, replay};

// == Operation Trait ==
/// A callable with a stable qualified name.
///
/// The name keys every record the wrappers write, so it must not change
/// between runs if existing store contents are to stay meaningful.
pub trait Operation {
    /// Argument type of the operation
    type Input;
    /// Result type of the operation
    type Output;

    /// Stable qualified name of the operation.
    fn name(&self) -> &str;

    /// Invokes the operation.
    fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Record Trait ==
/// Renders a value to the string form logged in the call history.
pub trait Record {
    /// Returns the logged representation.
    fn record(&self) -> String;
}

impl Record for String {
    fn record(&self) -> String {
        self.clone()
    }
}

impl Record for &str {
    fn record(&self) -> String {
        (*self).to_string()
    }
}

impl Record for i64 {
    fn record(&self) -> String {
        self.to_string()
    }
}

impl Record for f64 {
    fn record(&self) -> String {
        self.to_string()
    }
}

// == Key Scheme ==
/// Store key of an operation's input log.
pub fn inputs_key(name: &str) -> String {
    format!("{name}:inputs")
}

/// Store key of an operation's output log.
pub fn outputs_key(name: &str) -> String {
    format!("{name}:outputs")
}

// == Fn Operation ==
/// Leaf operation built from a name and a closure.
pub struct FnOp<F, I, O> {
    name: String,
    func: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> FnOp<F, I, O>
where
    F: Fn(I) -> Result<O>,
{
    /// Creates an operation from a qualified name and a closure.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _marker: PhantomData,
        }
    }
}

impl<F, I, O> Operation for FnOp<F, I, O>
where
    F: Fn(I) -> Result<O>,
{
    type Input = I;
    type Output = O;

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, input: I) -> Result<O> {
        (self.func)(input)
    }
}
