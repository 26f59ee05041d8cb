//! Recorded test data
//!
//! A test data file is a stream of JSON records pairing a command with the
//! response a correct server produces for it:
//!
//! ```text
//! {"RequestData":{"Action":"add","Key":"key3","Value":"value3"},"ExpectedResponse":null}
//! {"RequestData":{"Action":"get","Key":"key3","Value":"value3"},"ExpectedResponse":"value3"}
//! {"RequestData":{"Action":"getAll","Key":"key7","Value":""},"ExpectedResponse":{"key3":"value3"}}
//! ```
//!
//! Replaying the commands and comparing the outcome log against the
//! expected responses checks a server end to end.

use std::fmt;
use std::io::Read;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::{Action, Command, Outcome};

/// Expected response recorded for one command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExpectedResponse {
    /// No response payload (`add`, `remove`, `get` of a missing key)
    #[default]
    Absent,

    /// Value returned by `get`
    Value(String),

    /// Ordered entries returned by `getAll`
    Listing(Vec<(String, String)>),
}

impl Serialize for ExpectedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ExpectedResponse::Absent => serializer.serialize_none(),
            ExpectedResponse::Value(value) => serializer.serialize_str(value),
            ExpectedResponse::Listing(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ExpectedResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ExpectedResponseVisitor)
    }
}

struct ExpectedResponseVisitor;

impl<'de> Visitor<'de> for ExpectedResponseVisitor {
    type Value = ExpectedResponse;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a string, or an object of string values")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(ExpectedResponse::Absent)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(ExpectedResponse::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(ExpectedResponse::Value(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Self::Value, E> {
        Ok(ExpectedResponse::Value(value))
    }

    // Object keys arrive in document order, which is insertion order
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, String>()? {
            entries.push((key, value));
        }
        Ok(ExpectedResponse::Listing(entries))
    }
}

/// One recorded command and its expected response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDataAction {
    #[serde(rename = "RequestData")]
    pub request: Command,

    #[serde(rename = "ExpectedResponse", default)]
    pub expected: ExpectedResponse,
}

impl TestDataAction {
    /// Outcome line a correct server writes for this record, if the record
    /// carries enough information to predict it
    ///
    /// Only `get` and `getAll` carry an expected response.
    pub fn expected_line(&self) -> Option<String> {
        let key = self.request.key().to_string();
        let outcome = match (self.request.action(), &self.expected) {
            (Action::Get, ExpectedResponse::Value(value)) => Outcome::Found {
                key,
                value: value.clone(),
            },
            (Action::Get, ExpectedResponse::Absent) => Outcome::NotFound { key },
            (Action::GetAll, ExpectedResponse::Listing(entries)) => Outcome::Listing(entries.clone()),
            _ => return None,
        };
        Some(outcome.to_string())
    }
}

/// Read every record from a test data stream
///
/// Records may be separated by any JSON whitespace, one per line being the
/// usual layout.
pub fn parse_test_data<R: Read>(reader: R) -> Result<Vec<TestDataAction>> {
    let mut actions = Vec::new();
    for record in serde_json::Deserializer::from_reader(reader).into_iter::<TestDataAction>() {
        actions.push(record?);
    }
    Ok(actions)
}

/// A predicted outcome line that the log does not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Index of the record in the test data
    pub record: usize,

    pub expected: String,

    /// None when the log ended before this record's line
    pub actual: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "record {}: expected {:?}, got {:?}",
                self.record, self.expected, actual
            ),
            None => write!(f, "record {}: expected {:?}, log ended", self.record, self.expected),
        }
    }
}

/// Compare an outcome log with the expected responses of the records
/// that produced it
///
/// Records with an unknown action produced no line and are skipped when
/// pairing records with lines. Returns every mismatch found.
pub fn verify_outcomes<S: AsRef<str>>(actions: &[TestDataAction], lines: &[S]) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    let mut lines = lines.iter().map(|line| AsRef::<str>::as_ref(line));

    for (record, action) in actions.iter().enumerate() {
        if !action.request.action().is_known() {
            continue;
        }

        let actual = lines.next();
        let Some(expected) = action.expected_line() else {
            continue;
        };

        if actual != Some(expected.as_str()) {
            mismatches.push(Mismatch {
                record,
                expected,
                actual: actual.map(str::to_string),
            });
        }
    }

    mismatches
}
