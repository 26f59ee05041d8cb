//! Command Source Module
//!
//! Producers of the command stream the pipeline drains.
//!
//! ## Responsibilities
//! - Hand the pipeline well-formed commands, one at a time, in arrival order
//! - Signal end-of-stream once the producer side is exhausted
//! - Filter malformed payloads (log and skip, never stop the stream)

mod channel;
mod lines;

pub use channel::{ChannelSource, PayloadSource};
pub use lines::LineSource;

use crate::protocol::Command;

/// A blocking, sequential stream of decoded commands
pub trait CommandSource {
    /// Wait for the next command
    ///
    /// Returns None once the stream has ended; it must keep returning None
    /// afterwards.
    fn next_command(&mut self) -> Option<Command>;

    /// Number of malformed payloads skipped so far
    fn skipped(&self) -> u64 {
        0
    }
}

impl<S: CommandSource + ?Sized> CommandSource for Box<S> {
    fn next_command(&mut self) -> Option<Command> {
        (**self).next_command()
    }

    fn skipped(&self) -> u64 {
        (**self).skipped()
    }
}
