//! OrderedStore implementation
//!
//! Arena-backed linked map behind a `parking_lot::RwLock`.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::Entry;

/// Insertion-ordered key-value store
///
/// ## Concurrency Model
///
/// - **Writes** (`add`/`remove`): exclusive write lock, one at a time
/// - **Reads** (`get`/`snapshot`/`len`): shared read lock, run in parallel
///
/// Every mutation completes under a single write guard, so readers see
/// either the state before or after it, never a half-linked list.
pub struct OrderedStore {
    inner: RwLock<Links>,
}

/// Lock-protected state: key index, entry arena and list ends
#[derive(Debug, Default)]
struct Links {
    /// Key -> slot holding its entry
    index: HashMap<String, usize>,

    /// Entry arena (None = vacant slot)
    slots: Vec<Option<Entry>>,

    /// Vacant slots available for reuse
    free: Vec<usize>,

    /// First entry in insertion order
    head: Option<usize>,

    /// Last entry in insertion order
    tail: Option<usize>,
}

impl OrderedStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Links::default()),
        }
    }

    /// Add a key-value pair (write lock)
    ///
    /// A new key is appended at the tail. An existing key keeps its
    /// position and only has its value replaced.
    ///
    /// Returns true if the key was newly inserted.
    pub fn add(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.inner.write().insert(key.into(), value.into())
    }

    /// Remove a key (write lock)
    ///
    /// Returns false, leaving the store untouched, if the key is absent.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.write().remove(key)
    }

    /// Get the current value of a key (read lock)
    pub fn get(&self, key: &str) -> Option<String> {
        let links = self.inner.read();
        links
            .index
            .get(key)
            .map(|&slot| links.entry(slot).value.clone())
    }

    /// Check whether a key is present (read lock)
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().index.contains_key(key)
    }

    /// Copy all entries in insertion order (read lock)
    ///
    /// The copy is taken under one guard, so it reflects exactly the
    /// mutations that completed before it.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let links = self.inner.read();
        let mut entries = Vec::with_capacity(links.index.len());

        let mut cursor = links.head;
        while let Some(slot) = cursor {
            let entry = links.entry(slot);
            entries.push((entry.key.clone(), entry.value.clone()));
            cursor = entry.next;
        }

        entries
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.inner.read().index.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OrderedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrderedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedStore")
            .field("len", &self.len())
            .finish()
    }
}

// =============================================================================
// Linked arena operations (called with the lock held)
// =============================================================================

impl Links {
    fn entry(&self, slot: usize) -> &Entry {
        match &self.slots[slot] {
            Some(entry) => entry,
            None => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn entry_mut(&mut self, slot: usize) -> &mut Entry {
        match &mut self.slots[slot] {
            Some(entry) => entry,
            None => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn insert(&mut self, key: String, value: String) -> bool {
        if let Some(&slot) = self.index.get(&key) {
            self.entry_mut(slot).value = value;
            return false;
        }

        let entry = Entry {
            key: key.clone(),
            value,
            prev: self.tail,
            next: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.entry_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.index.insert(key, slot);

        true
    }

    fn remove(&mut self, key: &str) -> bool {
        let Some(slot) = self.index.remove(key) else {
            return false;
        };

        let (prev, next) = {
            let entry = self.entry(slot);
            (entry.prev, entry.next)
        };

        match prev {
            Some(prev) => self.entry_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.entry_mut(next).prev = prev,
            None => self.tail = prev,
        }

        self.slots[slot] = None;
        self.free.push(slot);

        true
    }
}
