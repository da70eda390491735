//! Cached Counter Module
//!
//! A value store whose `store` operation is wrapped with call counting and
//! call history, handing back a freshly generated unique key per value.

use uuid::Uuid;

use crate::error::Result;
use crate::store::StoreHandle;
use crate::wrap::{read_count, Counted, Operation, Record, Recorded};

// == Qualified Name ==
/// Qualified name of the store operation; keys the counter and both call
/// logs, so it must stay stable across versions.
pub const STORE_OP_NAME: &str = "CachedCounter.store";

// == Value ==
/// Input union accepted by [`CachedCounter::store`].
///
/// Strings and byte sequences are stored raw; integers and floats are stored
/// as their decimal text form, which is what the typed `get_*` readers parse
/// back.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Str(String),
    /// Opaque bytes
    Bytes(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
}

impl Value {
    /// Encodes the value to its stored byte form.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Str(s) => s.as_bytes().to_vec(),
            Value::Bytes(b) => b.clone(),
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl Record for Value {
    fn record(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

// == Store Operation ==
/// Leaf operation behind [`CachedCounter::store`]: writes the value under a
/// fresh v4 UUID key and returns the key.
///
/// Key collisions across calls are treated as negligible, not handled.
struct StoreOp {
    store: StoreHandle,
}

impl Operation for StoreOp {
    type Input = Value;
    type Output = String;

    fn name(&self) -> &str {
        STORE_OP_NAME
    }

    fn call(&self, input: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &input.to_bytes())?;
        Ok(key)
    }
}

// == Cached Counter ==
/// Value store with counted, recorded `store` calls.
///
/// Construction composes the wrappers explicitly:
/// `Counted(Recorded(StoreOp))`, so each successful `store` call increments
/// the `CachedCounter.store` counter, appends one record to each call log,
/// and keeps all three in step.
pub struct CachedCounter {
    store: StoreHandle,
    store_op: Counted<Recorded<StoreOp>>,
}

impl CachedCounter {
    // == Constructor ==
    /// Creates a CachedCounter over the given store handle.
    pub fn new(store: StoreHandle) -> Self {
        let leaf = StoreOp {
            store: store.clone(),
        };
        let store_op = Counted::new(store.clone(), Recorded::new(store.clone(), leaf));

        Self { store, store_op }
    }

    // == Store ==
    /// Stores a value under a freshly generated unique key and returns the
    /// key.
    pub fn store(&self, value: impl Into<Value>) -> Result<String> {
        self.store_op.call(value.into())
    }

    // == Get ==
    /// Reads the raw bytes stored under `key`; `None` if absent or expired.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key)
    }

    // == Get Str ==
    /// Reads the value under `key` as UTF-8 text.
    ///
    /// Absent keys and undecodable bytes read as `""`.
    pub fn get_str(&self, key: &str) -> Result<String> {
        let text = self
            .get(key)?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default();
        Ok(text)
    }

    // == Get Int ==
    /// Reads the value under `key` as an integer.
    ///
    /// Absent keys and undecodable bytes read as 0, never an error.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        let value = self
            .get(key)?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|text| text.parse().ok())
            .unwrap_or(0);
        Ok(value)
    }

    // == Get Float ==
    /// Reads the value under `key` as a float.
    ///
    /// Absent keys and undecodable bytes read as 0.0.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        let value = self
            .get(key)?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|text| text.parse().ok())
            .unwrap_or(0.0);
        Ok(value)
    }

    // == Call Count ==
    /// Reads how many times `store` has been invoked.
    pub fn call_count(&self) -> Result<i64> {
        read_count(&self.store, STORE_OP_NAME)
    }
}
