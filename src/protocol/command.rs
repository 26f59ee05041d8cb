//! Command definitions
//!
//! Represents decoded instructions from the command queue.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{OrderKvError, Result};

/// Command actions
///
/// Decoding never fails on the action: unrecognized strings are kept in
/// `Unknown` so the pipeline can drop them quietly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Add,
    Remove,
    Get,
    GetAll,
    Unknown(String),
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Get => "get",
            Action::GetAll => "getAll",
            Action::Unknown(name) => name,
        }
    }

    /// Whether the pipeline acts on this action
    pub fn is_known(&self) -> bool {
        !matches!(self, Action::Unknown(_))
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Unknown(String::new())
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        match name {
            "add" => Action::Add,
            "remove" => Action::Remove,
            "get" => Action::Get,
            "getAll" => Action::GetAll,
            other => Action::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        match Action::from(name.as_str()) {
            Action::Unknown(_) => Action::Unknown(name),
            known => known,
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded command
///
/// Commands carry no identity beyond their fields and are never mutated
/// after decoding.
///
/// Encodes with the field names `Action`, `Key` and `Value`. Decoding
/// matches those names case-insensitively; missing or null fields are
/// empty and unrecognized fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Command {
    #[serde(rename = "Action")]
    action: Action,

    #[serde(rename = "Key")]
    key: String,

    /// Only meaningful for `add`
    #[serde(rename = "Value")]
    value: String,
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CommandVisitor)
    }
}

struct CommandVisitor;

impl<'de> Visitor<'de> for CommandVisitor {
    type Value = Command;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with Action, Key and Value fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut command = Command::default();

        // Later duplicates overwrite earlier ones
        while let Some(field) = map.next_key::<String>()? {
            if field.eq_ignore_ascii_case("action") {
                command.action = map.next_value::<Option<String>>()?.unwrap_or_default().into();
            } else if field.eq_ignore_ascii_case("key") {
                command.key = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else if field.eq_ignore_ascii_case("value") {
                command.value = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(command)
    }
}

impl Command {
    /// Build a command from its raw parts
    pub fn new(action: impl Into<Action>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Action::Add, key, value)
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::new(Action::Remove, key, "")
    }

    pub fn get(key: impl Into<String>) -> Self {
        Self::new(Action::Get, key, "")
    }

    pub fn get_all() -> Self {
        Self::new(Action::GetAll, "", "")
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check that the command is complete enough to publish
    ///
    /// Producer-side check: the action must be known, `add`/`get`/`remove`
    /// need a key and `add` needs a value. The pipeline itself never
    /// rejects a command.
    pub fn validate(&self) -> Result<()> {
        match self.action {
            Action::Unknown(ref name) => Err(OrderKvError::InvalidCommand(format!(
                "unknown action {:?}, must be one of: add, remove, get, getAll",
                name
            ))),
            Action::Add | Action::Remove | Action::Get if self.key.is_empty() => {
                Err(OrderKvError::InvalidCommand(format!(
                    "key is required for {}",
                    self.action
                )))
            }
            Action::Add if self.value.is_empty() => Err(OrderKvError::InvalidCommand(
                "value is required for add".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
