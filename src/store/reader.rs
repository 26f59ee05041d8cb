//! Read-only store handle
//!
//! Lets callers other than the pipeline worker query the store while the
//! worker keeps applying writes.

use std::sync::Arc;

use super::OrderedStore;

/// Cloneable, read-only view of an [`OrderedStore`]
///
/// Exposes no mutating operation: the pipeline worker remains the only
/// writer, which is what keeps command application in arrival order.
#[derive(Debug, Clone)]
pub struct StoreReader {
    store: Arc<OrderedStore>,
}

impl StoreReader {
    pub(crate) fn new(store: Arc<OrderedStore>) -> Self {
        Self { store }
    }

    /// Get the current value of a key
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Ordered point-in-time copy of all entries
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.store.snapshot()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
