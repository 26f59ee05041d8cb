//! File sink
//!
//! Appends outcome lines to a file from a dedicated writer thread.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Sender};

use crate::error::{OrderKvError, Result};
use super::OutcomeSink;

/// Outcome sink backed by an append-only file
///
/// Callers hand lines to the writer thread over a channel; the writer is
/// the only thread touching the file. `close` waits for every queued line
/// to reach the file.
pub struct FileSink {
    path: PathBuf,
    sender: Option<Sender<String>>,
    writer: Option<JoinHandle<std::io::Result<u64>>>,
}

impl FileSink {
    /// Open (or create) the file in append mode and start the writer
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let (sender, receiver) = channel::unbounded::<String>();
        let writer = thread::Builder::new()
            .name("orderkv-outcome-log".to_string())
            .spawn(move || write_loop(file, receiver))?;

        tracing::debug!("Outcome log opened at {}", path.display());

        Ok(Self {
            path,
            sender: Some(sender),
            writer: Some(writer),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Drain lines until every sender is gone
///
/// The buffer is flushed whenever the writer catches up with the channel,
/// so a line reaches the file as soon as no other line is queued behind it.
fn write_loop(file: File, lines: channel::Receiver<String>) -> std::io::Result<u64> {
    let mut out = BufWriter::new(file);
    let mut written = 0;

    for line in lines.iter() {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        written += 1;

        if lines.is_empty() {
            out.flush()?;
        }
    }

    out.flush()?;
    out.get_ref().sync_data()?;
    Ok(written)
}

impl OutcomeSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| OrderKvError::Sink("outcome log is closed".to_string()))?;

        sender
            .send(line.to_string())
            .map_err(|_| OrderKvError::Sink("outcome log writer has stopped".to_string()))
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the sender ends the writer's loop
        self.sender.take();

        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        match writer.join() {
            Ok(Ok(written)) => {
                tracing::debug!("Outcome log {} closed after {} lines", self.path.display(), written);
                Ok(())
            }
            Ok(Err(e)) => Err(OrderKvError::Io(e)),
            Err(_) => Err(OrderKvError::Sink("outcome log writer panicked".to_string())),
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::error!("Failed to close outcome log {}: {}", self.path.display(), e);
        }
    }
}
