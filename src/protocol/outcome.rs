//! Outcome definitions
//!
//! One outcome per applied command, rendered as a single log line.

use std::fmt;

use super::Action;

/// Result of applying a command to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `add` stored the value (new key or overwrite)
    Added { key: String, value: String },

    /// `remove` deleted an existing key
    Removed { key: String },

    /// `remove` found nothing to delete
    RemoveMissing { key: String },

    /// `get` found the key
    Found { key: String, value: String },

    /// `get` did not find the key
    NotFound { key: String },

    /// `getAll` listing in insertion order
    Listing(Vec<(String, String)>),
}

impl Outcome {
    /// Action that produced this outcome
    pub fn action(&self) -> Action {
        match self {
            Outcome::Added { .. } => Action::Add,
            Outcome::Removed { .. } | Outcome::RemoveMissing { .. } => Action::Remove,
            Outcome::Found { .. } | Outcome::NotFound { .. } => Action::Get,
            Outcome::Listing(_) => Action::GetAll,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { key, value } => {
                write!(f, "[add] Added key {} with value {}", key, value)
            }
            Outcome::Removed { key } => write!(f, "[remove] key {}", key),
            Outcome::RemoveMissing { key } => {
                write!(f, "[remove] key {} doesn't exist", key)
            }
            Outcome::Found { key, value } => {
                write!(f, "[get] Got key {} with value {}", key, value)
            }
            Outcome::NotFound { key } => write!(f, "[get] Key {} doesn't exist", key),
            Outcome::Listing(entries) => {
                let pairs: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect();
                // A Vec<String> always serializes
                let listing = serde_json::to_string(&pairs).map_err(|_| fmt::Error)?;
                write!(f, "[getAll] All values {}", listing)
            }
        }
    }
}
