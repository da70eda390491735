//! Document Collection Module
//!
//! Minimal in-memory document collection with a "field contains value"
//! filter query. Matching is a lazy scan; no pagination or indexing.

use serde_json::Value;

// == Collection ==
/// In-memory collection of JSON documents.
#[derive(Debug, Default)]
pub struct Collection {
    docs: Vec<Value>,
}

impl Collection {
    // == Constructor ==
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Appends a document to the collection.
    pub fn insert(&mut self, doc: Value) {
        self.docs.push(doc);
    }

    // == Find Containing ==
    /// Returns the documents whose array-valued `field` contains `value`.
    ///
    /// Documents without the field, or where the field is not an array, never
    /// match. The returned iterator is lazy; nothing is scanned until it is
    /// consumed. The filter value is owned by the iterator, so the yielded
    /// documents borrow from the collection alone.
    pub fn find_containing<'a>(
        &'a self,
        field: &'a str,
        value: Value,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.docs.iter().filter(move |doc| {
            doc.get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(&value))
        })
    }

    // == Find By Topic ==
    /// Returns the documents whose `"topics"` array contains `topic`.
    pub fn find_by_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.docs.iter().filter(move |doc| {
            doc.get("topics")
                .and_then(Value::as_array)
                .is_some_and(|topics| topics.iter().any(|t| t.as_str() == Some(topic)))
        })
    }

    // == Length ==
    /// Returns the number of documents in the collection.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    // == Is Empty ==
    /// Returns true if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
