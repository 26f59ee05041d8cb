//! In-memory sink
//!
//! Keeps outcome lines in a shared buffer, for tests and embedding.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{OrderKvError, Result};
use super::OutcomeSink;

#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<String>,
    closed: bool,
}

/// Cloneable in-memory outcome sink
///
/// Clones share one buffer, so a clone kept by the caller observes what the
/// pipeline wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Buffer>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.buffer.lock().closed
    }
}

impl OutcomeSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut buffer = self.buffer.lock();
        if buffer.closed {
            return Err(OrderKvError::Sink("sink is closed".to_string()));
        }
        buffer.lines.push(line.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.buffer.lock().closed = true;
        Ok(())
    }
}
