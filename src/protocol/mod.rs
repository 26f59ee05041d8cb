//! Protocol Module
//!
//! Defines the command payloads consumed from the queue and the outcome
//! lines written for each processed command.
//!
//! ## Payload Format
//!
//! One self-describing JSON object per message:
//!
//! ```text
//! {"Action":"add","Key":"foo","Value":"bar"}
//! ```
//!
//! ### Actions
//! - `add`:    store `Value` under `Key`
//! - `remove`: delete `Key`
//! - `get`:    look up `Key`
//! - `getAll`: list every entry in insertion order
//!
//! `Value` is only meaningful for `add`. Any other action string decodes
//! successfully and is ignored by the pipeline.
//!
//! ## Outcome Lines
//! ```text
//! [add] Added key foo with value bar
//! [remove] key foo
//! [remove] key foo doesn't exist
//! [get] Got key foo with value bar
//! [get] Key foo doesn't exist
//! [getAll] All values ["foo=bar","baz=qux"]
//! ```

mod command;
mod codec;
mod outcome;
mod testdata;

pub use command::{Action, Command};
pub use codec::{decode_command, decode_line, encode_command};
pub use outcome::Outcome;
pub use testdata::{parse_test_data, verify_outcomes, ExpectedResponse, Mismatch, TestDataAction};
