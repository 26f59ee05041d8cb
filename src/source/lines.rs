//! Newline-delimited JSON source
//!
//! Reads one payload per line from any buffered reader (stdin, a file,
//! a replayed capture).

use std::io::BufRead;

use crate::protocol::{decode_command, Command};
use super::CommandSource;

/// Source over newline-delimited JSON payloads
///
/// Lines are read as raw bytes, so a line that is not valid UTF-8 is just
/// another malformed payload. Only a failing reader ends the stream early.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: u64,
    skipped: u64,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
            finished: false,
        }
    }
}

impl<R: BufRead> CommandSource for LineSource<R> {
    fn next_command(&mut self) -> Option<Command> {
        while !self.finished {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    match decode_command(&self.buf) {
                        Ok(command) => return Some(command),
                        Err(e) => {
                            self.skipped += 1;
                            tracing::warn!(line = self.line_no, "Skipping malformed payload: {}", e);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(line = self.line_no, "Command input failed, ending stream: {}", e);
                    self.finished = true;
                }
            }
        }
        None
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}
