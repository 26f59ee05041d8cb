//! Channel-backed sources
//!
//! A queue consumer hands messages over a crossbeam channel; the stream
//! ends when every sender has been dropped.

use crossbeam::channel::Receiver;

use crate::protocol::{decode_command, Command};
use super::CommandSource;

/// Source over already-decoded commands
pub struct ChannelSource {
    receiver: Receiver<Command>,
}

impl ChannelSource {
    pub fn new(receiver: Receiver<Command>) -> Self {
        Self { receiver }
    }
}

impl CommandSource for ChannelSource {
    fn next_command(&mut self) -> Option<Command> {
        self.receiver.recv().ok()
    }
}

/// Source over raw message bodies
///
/// Each body is decoded as one JSON command. Bodies that fail to decode are
/// logged and skipped.
pub struct PayloadSource {
    receiver: Receiver<Vec<u8>>,
    skipped: u64,
}

impl PayloadSource {
    pub fn new(receiver: Receiver<Vec<u8>>) -> Self {
        Self {
            receiver,
            skipped: 0,
        }
    }
}

impl CommandSource for PayloadSource {
    fn next_command(&mut self) -> Option<Command> {
        loop {
            let payload = self.receiver.recv().ok()?;
            match decode_command(&payload) {
                Ok(command) => return Some(command),
                Err(e) => {
                    self.skipped += 1;
                    tracing::warn!(
                        bytes = payload.len(),
                        "Failed to decode message: {}", e
                    );
                }
            }
        }
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}
