//! Outcome Sink Module
//!
//! Line-oriented recorders of processing results.
//!
//! ## Responsibilities
//! - Append one line per processed command, in the order given
//! - Serialize writes to the underlying target
//! - Flush and finalize on close

mod file;
mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

use crate::error::Result;

/// Accepts formatted outcome lines
pub trait OutcomeSink {
    /// Append one line (without trailing newline)
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flush and finalize; no lines may be written afterwards
    fn close(&mut self) -> Result<()>;
}

impl<S: OutcomeSink + ?Sized> OutcomeSink for Box<S> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
