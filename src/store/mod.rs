//! Store Module
//!
//! Insertion-ordered in-memory key-value store.
//!
//! ## Responsibilities
//! - O(1) average point add/get/remove
//! - Remember the order in which keys were first added
//! - Point-in-time ordered snapshots
//! - Shared reads, exclusive writes
//!
//! ## Data Structure Choice
//! A hash map alone loses insertion order and a linked list alone has no
//! fast point lookup, so both are combined:
//!
//! ```text
//!   index: HashMap<String, usize>
//!            │         │         │
//!            ▼         ▼         ▼
//!   slots: [ a=1 ] ⇄ [ b=2 ] ⇄ [ c=3 ]      head = 0, tail = 2
//! ```
//!
//! Entries live in an arena (`Vec` of slots) and link to their neighbours
//! by slot index. Freed slots are recycled, so an entry keeps its index for
//! as long as it lives.

mod ordered;
mod reader;

pub use ordered::OrderedStore;
pub use reader::StoreReader;

/// One stored record, linked to its neighbours in insertion order
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}
