//! Protocol codec
//!
//! JSON encoding and decoding of command payloads.

use crate::error::{OrderKvError, Result};
use super::Command;

/// Decode one message body into a command
///
/// Fails with `OrderKvError::Decode` on malformed JSON or on fields of the
/// wrong type. An unrecognized action is not a decode failure.
pub fn decode_command(payload: &[u8]) -> Result<Command> {
    Ok(serde_json::from_slice(payload)?)
}

/// Decode one line of newline-delimited JSON
pub fn decode_line(line: &str) -> Result<Command> {
    decode_command(line.trim().as_bytes())
}

/// Encode a command as a single-line JSON payload
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    serde_json::to_vec(command).map_err(|e| OrderKvError::Encode(e.to_string()))
}
